//! The sandbox commands.

use std::io::Write;
use std::path::Path as FsPath;

use gridpath_core::{Grid, mapfile};
use gridpath_mapgen::MapGen;
use gridpath_search::{Path, RunStatistics, Search, SearchOutcome, StatsSink, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::cancel::Deadline;
use crate::cli::MazeArgs;
use crate::config::SandboxConfig;
use crate::error::SandboxError;
use crate::render::TraceRenderer;
use crate::results::CsvStatsSink;

/// Result of one strategy run, as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub strategy: Strategy,
    pub canceled: bool,
    pub path: Option<Path>,
    pub stats: Option<RunStatistics>,
}

/// Map identifier recorded in statistics: the bare file name.
pub fn map_identifier(path: &FsPath) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Run every configured strategy on the configured map.
pub fn run<W: Write>(cfg: &SandboxConfig, out: &mut W) -> Result<Vec<RunReport>, SandboxError> {
    let grid = mapfile::load(&cfg.map)?;
    let map_id = map_identifier(&cfg.map);
    let mut sink = cfg.stats_path.as_ref().map(CsvStatsSink::new);
    let mut reports = Vec::with_capacity(cfg.strategies.len());

    for &strategy in &cfg.strategies {
        let mut search = Search::new(&grid, strategy);
        if let Some(id) = &map_id {
            search = search.map_id(id.clone());
        }
        let mut trace = TraceRenderer::new();
        let mut deadline = Deadline::new(cfg.timeout);
        let outcome = search.run(&mut trace, &mut deadline)?;

        if let (Some(sink), Some(stats)) = (sink.as_mut(), outcome.stats()) {
            sink.record(stats)?;
        }
        if !cfg.json {
            writeln!(out, "{}", summary(strategy, &outcome))?;
            if cfg.render && outcome != SearchOutcome::Canceled {
                write!(out, "{}", trace.render(&grid, outcome.path()))?;
            }
        }
        reports.push(RunReport {
            strategy,
            canceled: outcome == SearchOutcome::Canceled,
            path: outcome.path().cloned(),
            stats: outcome.stats().cloned(),
        });
    }

    if cfg.json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    }
    Ok(reports)
}

fn summary(strategy: Strategy, outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Found { path, stats } => format!(
            "{:<12} path of {} steps, {} cells visited, max frontier {}, {:.6}s",
            strategy.name(),
            path.steps(),
            stats.visited_count,
            stats.max_frontier_size,
            stats.runtime_seconds
        ),
        SearchOutcome::NotFound { stats } => format!(
            "{:<12} no path, {} cells visited, max frontier {}, {:.6}s",
            strategy.name(),
            stats.visited_count,
            stats.max_frontier_size,
            stats.runtime_seconds
        ),
        SearchOutcome::Canceled => format!("{:<12} canceled", strategy.name()),
    }
}

/// Generate a map: a maze, or scattered obstacles when a density is given.
pub fn generate(args: &MazeArgs) -> Result<Grid, SandboxError> {
    match args.seed {
        Some(seed) => generate_with(MapGen::new(StdRng::seed_from_u64(seed)), args),
        None => generate_with(MapGen::new(rand::rng()), args),
    }
}

fn generate_with<R: rand::Rng>(mut mg: MapGen<R>, args: &MazeArgs) -> Result<Grid, SandboxError> {
    let grid = match args.density {
        Some(density) => mg.scatter(args.rows, args.cols, density)?,
        None => mg.maze(args.rows, args.cols)?,
    };
    Ok(grid)
}

/// Generate a map and save it under `args.out`.
pub fn maze<W: Write>(args: &MazeArgs, out: &mut W) -> Result<(), SandboxError> {
    let grid = generate(args)?;
    mapfile::save(&grid, &args.out)?;
    writeln!(
        out,
        "Wrote {}x{} map to {}",
        grid.rows(),
        grid.cols(),
        args.out.display()
    )?;
    Ok(())
}

/// Print a map with its markers.
pub fn show<W: Write>(map: &FsPath, out: &mut W) -> Result<(), SandboxError> {
    let grid = mapfile::load(map)?;
    write!(out, "{}", TraceRenderer::new().render(&grid, None))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CSV_HEADER;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    const OPEN: &str = "rows 3\ncols 3\nstart 0,0\ngoal 2,2\n...\n...\n...\n";
    const WALLED: &str = "rows 3\ncols 3\nstart 0,0\ngoal 2,2\n.@.\n.@.\n.@.\n";

    fn config(map: PathBuf, stats: Option<PathBuf>) -> SandboxConfig {
        SandboxConfig {
            map,
            strategies: Strategy::ALL.to_vec(),
            stats_path: stats,
            timeout: None,
            render: false,
            json: false,
        }
    }

    #[test]
    fn map_identifier_is_file_name() {
        assert_eq!(
            map_identifier(FsPath::new("maps/sub/maze.txt")).as_deref(),
            Some("maze.txt")
        );
        assert_eq!(map_identifier(FsPath::new("/")), None);
    }

    #[test]
    fn run_all_records_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("open.txt");
        fs::write(&map, OPEN).unwrap();
        let stats = dir.path().join("results").join("Stats.csv");

        let mut out = Vec::new();
        let reports = run(&config(map, Some(stats.clone())), &mut out).unwrap();
        assert_eq!(reports.len(), 5);
        for r in &reports {
            assert!(!r.canceled);
            let path = r.path.as_ref().unwrap();
            if r.strategy.is_optimal() {
                assert_eq!(path.steps(), 4);
            }
            assert_eq!(
                r.stats.as_ref().unwrap().map_identifier.as_deref(),
                Some("open.txt")
            );
        }

        let text = fs::read_to_string(&stats).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], CSV_HEADER.join(";"));
        assert!(lines[1].starts_with("BFS;3;"));
        assert!(lines[1].ends_with(";True;open.txt"));

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().count(), 5);
        assert!(printed.contains("path of 4 steps"));
    }

    #[test]
    fn no_stats_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("walled.txt");
        fs::write(&map, WALLED).unwrap();

        let mut cfg = config(map, None);
        cfg.render = true;
        let mut out = Vec::new();
        let reports = run(&cfg, &mut out).unwrap();
        assert!(reports.iter().all(|r| r.path.is_none()));
        assert!(!dir.path().join("results").exists());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("no path"));
        assert!(printed.contains("S@.\n+@.\n+@G\n"));
    }

    #[test]
    fn expired_deadline_cancels_every_run() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("open.txt");
        fs::write(&map, OPEN).unwrap();
        let stats = dir.path().join("Stats.csv");

        let mut cfg = config(map, Some(stats.clone()));
        cfg.timeout = Some(Duration::ZERO);
        let reports = run(&cfg, &mut Vec::new()).unwrap();
        assert!(reports.iter().all(|r| r.canceled && r.stats.is_none()));
        assert!(!stats.exists());
    }

    #[test]
    fn json_output() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("open.txt");
        fs::write(&map, OPEN).unwrap();

        let mut cfg = config(map, None);
        cfg.strategies = vec![Strategy::AStar];
        cfg.json = true;
        let mut out = Vec::new();
        run(&cfg, &mut out).unwrap();

        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let runs = v.as_array().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0]["strategy"], "AStar");
        assert_eq!(runs[0]["stats"]["path_length"], 3);
        assert_eq!(runs[0]["path"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn missing_goal_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("nogoal.txt");
        fs::write(&map, "rows 1\ncols 2\nstart 0,0\n..\n").unwrap();
        let err = run(&config(map, None), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, SandboxError::Precondition(_)));
    }

    #[test]
    fn maze_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("maze.txt");
        let args = MazeArgs {
            out: out_path.clone(),
            rows: 9,
            cols: 11,
            seed: Some(7),
            density: None,
        };
        let mut out = Vec::new();
        maze(&args, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Wrote 9x11 map"));

        let grid = mapfile::load(&out_path).unwrap();
        assert_eq!(grid, generate(&args).unwrap());

        let mut shown = Vec::new();
        show(&out_path, &mut shown).unwrap();
        let shown = String::from_utf8(shown).unwrap();
        assert_eq!(shown.lines().count(), 9);
        assert_eq!(shown.lines().nth(1).unwrap().chars().nth(1), Some('S'));
    }

    #[test]
    fn scatter_density_is_validated() {
        let args = MazeArgs {
            out: PathBuf::from("unused.txt"),
            rows: 5,
            cols: 5,
            seed: Some(1),
            density: Some(2.0),
        };
        assert!(matches!(generate(&args), Err(SandboxError::MapGen(_))));
    }
}
