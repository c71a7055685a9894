//! Per-run statistics.

use std::fmt;
use std::time::{Duration, Instant};

use crate::strategy::Strategy;

/// Label written in place of a missing map identifier.
pub const UNKNOWN_MAP: &str = "not found";

/// Counters and timing of one completed search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStatistics {
    /// Path length excluding start and goal; 0 when nothing was found.
    pub path_length: usize,
    /// Discovered cells, the start excluded.
    pub visited_count: usize,
    /// Largest frontier size seen before a pop.
    pub max_frontier_size: usize,
    pub runtime_seconds: f64,
    pub found: bool,
    pub strategy: Strategy,
    pub map_identifier: Option<String>,
}

impl RunStatistics {
    /// The strategy's recorded name, e.g. `"A*"`.
    pub fn algorithm_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// The map identifier, or [`UNKNOWN_MAP`].
    pub fn map_label(&self) -> &str {
        self.map_identifier.as_deref().unwrap_or(UNKNOWN_MAP)
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} => path_len: {}, visited: {}, max_frontier: {}, runtime: {:.6}s, found: {}, map: {}",
            self.algorithm_name(),
            self.path_length,
            self.visited_count,
            self.max_frontier_size,
            self.runtime_seconds,
            self.found,
            self.map_identifier.as_deref().unwrap_or("na"),
        )
    }
}

/// Raw counters collected by the engine at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCounters {
    pub found: bool,
    /// Coordinates in the returned path, endpoints included.
    pub path_cells: usize,
    /// Size of the visited set, start included.
    pub visited_cells: usize,
    pub max_frontier_size: usize,
}

/// Times a run and turns its counters into a [`RunStatistics`].
///
/// The recorder performs no I/O; hand the result to a
/// [`StatsSink`](crate::StatsSink) to persist it.
#[derive(Debug)]
pub struct StatsRecorder {
    strategy: Strategy,
    map_identifier: Option<String>,
    started: Instant,
}

impl StatsRecorder {
    /// Start the clock.
    pub fn start(strategy: Strategy, map_identifier: Option<String>) -> Self {
        Self {
            strategy,
            map_identifier,
            started: Instant::now(),
        }
    }

    /// Stop the clock and build the record.
    pub fn finish(self, counters: RunCounters) -> RunStatistics {
        let runtime = self.started.elapsed();
        aggregate(self.strategy, self.map_identifier, counters, runtime)
    }
}

/// Pure aggregation of counters and elapsed time into one record.
pub fn aggregate(
    strategy: Strategy,
    map_identifier: Option<String>,
    counters: RunCounters,
    runtime: Duration,
) -> RunStatistics {
    let path_length = if counters.found {
        counters.path_cells.saturating_sub(2)
    } else {
        0
    };
    RunStatistics {
        path_length,
        visited_count: counters.visited_cells.saturating_sub(1),
        max_frontier_size: counters.max_frontier_size,
        runtime_seconds: runtime.as_secs_f64(),
        found: counters.found,
        strategy,
        map_identifier,
    }
}
