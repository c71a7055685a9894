//! Boundary contracts between the engine and its collaborators.

use std::io;

use gridpath_core::Point;

use crate::stats::RunStatistics;

/// Receives every newly discovered cell, once, in discovery order.
///
/// Implemented for any `FnMut(Point)` closure.
pub trait VisitSink {
    fn visit(&mut self, p: Point);
}

impl<F: FnMut(Point)> VisitSink for F {
    #[inline]
    fn visit(&mut self, p: Point) {
        self(p)
    }
}

/// Polled once per expansion step; returning `true` aborts the run.
///
/// Implemented for any `FnMut() -> bool` closure.
pub trait CancelSignal {
    fn is_canceled(&mut self) -> bool;
}

impl<F: FnMut() -> bool> CancelSignal for F {
    #[inline]
    fn is_canceled(&mut self) -> bool {
        self()
    }
}

/// A sink that ignores visits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVisit;

impl VisitSink for NoVisit {
    #[inline]
    fn visit(&mut self, _p: Point) {}
}

/// A signal that never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    #[inline]
    fn is_canceled(&mut self) -> bool {
        false
    }
}

/// Append-only destination for per-run statistics.
pub trait StatsSink {
    /// Persist one record.
    fn record(&mut self, stats: &RunStatistics) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks_and_signals() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: Point| seen.push(p);
            sink.visit(Point::new(1, 2));
        }
        assert_eq!(seen, vec![Point::new(1, 2)]);

        let mut polls = 0;
        let mut cancel = || {
            polls += 1;
            polls > 2
        };
        assert!(!cancel.is_canceled());
        assert!(!cancel.is_canceled());
        assert!(cancel.is_canceled());
        assert!(!NeverCancel.is_canceled());
    }
}
