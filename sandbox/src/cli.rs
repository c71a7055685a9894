//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gridpath_search::Strategy;

use crate::config::{DEFAULT_MAZE_COLS, DEFAULT_MAZE_ROWS};

#[derive(Parser, Debug)]
#[command(name = "gridpath")]
#[command(
    author,
    version,
    about = "Run and compare grid search strategies on map files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one or more strategies on a map
    Run(RunArgs),
    /// Generate a map and write it to a file
    Maze(MazeArgs),
    /// Print a map with its start and goal markers
    Show {
        #[arg(value_name = "MAP")]
        map: PathBuf,
    },
}

#[derive(Args, Debug)]
// Each flag toggles an independent output.
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Map file to load
    #[arg(value_name = "MAP")]
    pub map: PathBuf,

    /// Strategy to run: bfs, dfs, dijkstra, astar, greedy (repeatable)
    #[arg(short = 'a', long = "algorithm", value_name = "NAME")]
    pub algorithms: Vec<Strategy>,

    /// Run every strategy (the default when none is selected)
    #[arg(long)]
    pub all: bool,

    /// Statistics file to append to
    #[arg(long, value_name = "CSV")]
    pub stats: Option<PathBuf>,

    /// Do not record statistics
    #[arg(long)]
    pub no_stats: bool,

    /// Abandon a run after this many milliseconds
    #[arg(long, value_name = "N")]
    pub timeout_ms: Option<u64>,

    /// Draw the visited cells and path of every run
    #[arg(short, long)]
    pub render: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MazeArgs {
    /// Output map file
    #[arg(value_name = "OUT")]
    pub out: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MAZE_ROWS)]
    pub rows: i32,

    #[arg(long, default_value_t = DEFAULT_MAZE_COLS)]
    pub cols: i32,

    /// Random seed for reproducible maps
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Generate scattered obstacles at this density instead of a maze
    #[arg(short, long)]
    pub density: Option<f64>,
}
