use std::time::{Duration, Instant};

use gridpath_search::CancelSignal;

/// Cancels a run once a wall-clock deadline has passed.
///
/// A deadline built without a timeout never fires.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            at: timeout.map(|t| Instant::now() + t),
        }
    }
}

impl CancelSignal for Deadline {
    fn is_canceled(&mut self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}
