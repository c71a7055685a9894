//! Defaults and the resolved configuration of a `run` invocation.

use std::path::PathBuf;
use std::time::Duration;

use gridpath_search::Strategy;

use crate::cli::RunArgs;

/// Statistics file used when `--stats` is not given.
pub const DEFAULT_STATS_PATH: &str = "results/Stats.csv";
/// Field separator of the statistics file.
pub const CSV_DELIMITER: char = ';';
/// Column names of the statistics file.
pub const CSV_HEADER: [&str; 7] = [
    "Algorithm",
    "Path-Length",
    "Visited-Cubes",
    "Max-Queue-Size",
    "Runtime",
    "Found-Goal",
    "Map-Filename",
];

pub const DEFAULT_MAZE_ROWS: i32 = 21;
pub const DEFAULT_MAZE_COLS: i32 = 31;

/// Resolved settings for running strategies on one map.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxConfig {
    pub map: PathBuf,
    /// Strategies in run order, without duplicates.
    pub strategies: Vec<Strategy>,
    /// Where statistics are appended; `None` disables recording.
    pub stats_path: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub render: bool,
    pub json: bool,
}

impl From<RunArgs> for SandboxConfig {
    fn from(args: RunArgs) -> Self {
        let strategies = if args.all || args.algorithms.is_empty() {
            Strategy::ALL.to_vec()
        } else {
            let mut v: Vec<Strategy> = Vec::with_capacity(args.algorithms.len());
            for s in args.algorithms {
                if !v.contains(&s) {
                    v.push(s);
                }
            }
            v
        };
        let stats_path = if args.no_stats {
            None
        } else {
            Some(args.stats.unwrap_or_else(|| PathBuf::from(DEFAULT_STATS_PATH)))
        };
        Self {
            map: args.map,
            strategies,
            stats_path,
            timeout: args.timeout_ms.map(Duration::from_millis),
            render: args.render,
            json: args.json,
        }
    }
}
