//! The search engine: one expansion loop shared by every [`Strategy`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use gridpath_core::{Grid, Point};

use crate::frontier::{Entry, Frontier};
use crate::path::{Path, reconstruct};
use crate::stats::{RunCounters, RunStatistics, StatsRecorder};
use crate::strategy::{Admission, Strategy};
use crate::traits::{CancelSignal, NeverCancel, NoVisit, VisitSink};

/// Raised before any search work when the grid lacks an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    MissingStart,
    MissingGoal,
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("search: no start cell is set"),
            Self::MissingGoal => f.write_str("search: no goal cell is set"),
        }
    }
}

impl std::error::Error for PreconditionError {}

/// The final result of one run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The goal was popped; `path` runs from start to goal.
    Found { path: Path, stats: RunStatistics },
    /// The frontier emptied without reaching the goal.
    NotFound { stats: RunStatistics },
    /// The cancellation signal fired. No statistics are produced.
    Canceled,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn stats(&self) -> Option<&RunStatistics> {
        match self {
            Self::Found { stats, .. } | Self::NotFound { stats } => Some(stats),
            Self::Canceled => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// State owned by a single run and dropped when it ends.
struct RunState {
    frontier: Frontier,
    predecessors: HashMap<Point, Point>,
    /// Best known path cost, kept only by cost-improving strategies.
    costs: HashMap<Point, i32>,
    visited: HashSet<Point>,
    max_frontier: usize,
}

impl RunState {
    fn new(strategy: Strategy, start: Point, start_key: i32) -> Self {
        let mut frontier = Frontier::new(strategy.discipline());
        frontier.push(Entry { pos: start, cost: 0 }, start_key);
        let mut costs = HashMap::new();
        if strategy.admission() == Admission::ImprovesCost {
            costs.insert(start, 0);
        }
        Self {
            frontier,
            predecessors: HashMap::new(),
            costs,
            visited: HashSet::from([start]),
            max_frontier: 1,
        }
    }

    /// Whether a popped entry was superseded by a cheaper push.
    fn is_stale(&self, entry: Entry) -> bool {
        self.costs.get(&entry.pos).is_some_and(|&best| entry.cost > best)
    }

    /// Whether `p`, reached with cost `g`, enters the frontier.
    fn admits(&self, admission: Admission, p: Point, g: i32) -> bool {
        match admission {
            Admission::Unvisited => !self.visited.contains(&p),
            Admission::ImprovesCost => self.costs.get(&p).is_none_or(|&best| g < best),
        }
    }

    fn counters(&self, found: bool, path_cells: usize) -> RunCounters {
        RunCounters {
            found,
            path_cells,
            visited_cells: self.visited.len(),
            max_frontier_size: self.max_frontier,
        }
    }
}

/// A configured search over one grid.
///
/// ```
/// use gridpath_core::{Grid, Point};
/// use gridpath_search::{Search, Strategy};
///
/// let mut grid = Grid::new(5, 5);
/// grid.set_start(Point::new(0, 0)).unwrap();
/// grid.set_goal(Point::new(4, 4)).unwrap();
/// let outcome = Search::new(&grid, Strategy::AStar).run_quiet().unwrap();
/// assert_eq!(outcome.path().unwrap().steps(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Search<'g> {
    grid: &'g Grid,
    strategy: Strategy,
    map_id: Option<String>,
}

impl<'g> Search<'g> {
    pub fn new(grid: &'g Grid, strategy: Strategy) -> Self {
        Self {
            grid,
            strategy,
            map_id: None,
        }
    }

    /// Identifier recorded in the run's statistics (usually a file name).
    pub fn map_id(mut self, id: impl Into<String>) -> Self {
        self.map_id = Some(id.into());
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Run the search to completion, without visit notifications or
    /// cancellation.
    pub fn run_quiet(&self) -> Result<SearchOutcome, PreconditionError> {
        self.run(&mut NoVisit, &mut NeverCancel)
    }

    /// Run the search.
    ///
    /// `sink` is told about every newly discovered cell in discovery order.
    /// `cancel` is polled once per expansion step; when it reports `true`
    /// the run is abandoned and [`SearchOutcome::Canceled`] is returned.
    pub fn run<V, C>(
        &self,
        sink: &mut V,
        cancel: &mut C,
    ) -> Result<SearchOutcome, PreconditionError>
    where
        V: VisitSink + ?Sized,
        C: CancelSignal + ?Sized,
    {
        let start = self.grid.start().ok_or(PreconditionError::MissingStart)?;
        let goal = self.grid.goal().ok_or(PreconditionError::MissingGoal)?;
        let strategy = self.strategy;
        let admission = strategy.admission();

        let recorder = StatsRecorder::start(strategy, self.map_id.clone());
        let mut run = RunState::new(strategy, start, strategy.priority(0, start, goal));
        let mut nbuf = Vec::with_capacity(4);

        while !run.frontier.is_empty() {
            if cancel.is_canceled() {
                log::debug!(
                    "{} canceled after {} visited cells",
                    strategy.name(),
                    run.visited.len() - 1
                );
                return Ok(SearchOutcome::Canceled);
            }

            run.max_frontier = run.max_frontier.max(run.frontier.len());
            let Some(current) = run.frontier.pop() else {
                break;
            };
            if run.is_stale(current) {
                continue;
            }

            if current.pos == goal {
                let path = reconstruct(&run.predecessors, goal);
                let stats = recorder.finish(run.counters(true, path.len()));
                log::info!("Stats: {stats}");
                return Ok(SearchOutcome::Found { path, stats });
            }

            nbuf.clear();
            self.grid.neighbors_into(current.pos, &mut nbuf);
            let g = current.cost + 1;
            for &n in &nbuf {
                if !run.admits(admission, n, g) {
                    continue;
                }
                if admission == Admission::ImprovesCost {
                    run.costs.insert(n, g);
                }
                run.predecessors.insert(n, current.pos);
                run.frontier
                    .push(Entry { pos: n, cost: g }, strategy.priority(g, n, goal));
                if run.visited.insert(n) {
                    sink.visit(n);
                }
            }
        }

        log::info!("No path found.");
        let stats = recorder.finish(run.counters(false, 0));
        log::info!("Stats: {stats}");
        Ok(SearchOutcome::NotFound { stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::mapfile;
    use gridpath_mapgen::MapGen;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    fn open_grid(rows: i32, cols: i32, start: Point, goal: Point) -> Grid {
        let mut g = Grid::new(rows, cols);
        g.set_start(start).unwrap();
        g.set_goal(goal).unwrap();
        g
    }

    /// Reference BFS: distance map from `from` over traversable cells.
    fn distances(grid: &Grid, from: Point) -> HashMap<Point, usize> {
        let mut dist = HashMap::from([(from, 0)]);
        let mut queue = VecDeque::from([from]);
        while let Some(p) = queue.pop_front() {
            let d = dist[&p];
            for n in grid.neighbors(p) {
                if !dist.contains_key(&n) {
                    dist.insert(n, d + 1);
                    queue.push_back(n);
                }
            }
        }
        dist
    }

    fn run_traced(grid: &Grid, strategy: Strategy) -> (SearchOutcome, Vec<Point>) {
        let mut trace = Vec::new();
        let outcome = Search::new(grid, strategy)
            .run(&mut |p: Point| trace.push(p), &mut NeverCancel)
            .unwrap();
        (outcome, trace)
    }

    fn assert_valid_path(grid: &Grid, path: &Path) {
        assert_eq!(path.start(), grid.start());
        assert_eq!(path.goal(), grid.goal());
        assert!(path.is_contiguous());
        assert!(path.iter().all(|&p| grid.is_traversable(p)));
    }

    #[test]
    fn missing_endpoints() {
        let mut g = Grid::new(3, 3);
        for s in Strategy::ALL {
            assert_eq!(
                Search::new(&g, s).run_quiet(),
                Err(PreconditionError::MissingStart)
            );
        }
        g.set_start(Point::new(0, 0)).unwrap();
        assert_eq!(
            Search::new(&g, Strategy::AStar).run_quiet(),
            Err(PreconditionError::MissingGoal)
        );
    }

    #[test]
    fn missing_endpoints_do_no_work() {
        let g = Grid::new(3, 3);
        let mut polled = false;
        let mut visited = 0;
        let res = Search::new(&g, Strategy::BreadthFirst).run(
            &mut |_: Point| visited += 1,
            &mut || {
                polled = true;
                false
            },
        );
        assert!(res.is_err());
        assert!(!polled);
        assert_eq!(visited, 0);
    }

    #[test]
    fn open_5x5_scenario() {
        let g = open_grid(5, 5, Point::new(0, 0), Point::new(4, 4));
        for s in Strategy::ALL {
            let outcome = Search::new(&g, s).run_quiet().unwrap();
            let path = outcome.path().unwrap();
            assert_valid_path(&g, path);
            if s.is_optimal() {
                assert_eq!(path.steps(), 8, "{s}");
                assert_eq!(outcome.stats().unwrap().path_length, 7, "{s}");
            } else {
                assert!(path.steps() >= 8, "{s}");
            }
        }
    }

    #[test]
    fn greedy_hugs_the_top_edge_on_open_grid() {
        let g = open_grid(5, 5, Point::new(0, 0), Point::new(4, 4));
        let outcome = Search::new(&g, Strategy::GreedyBestFirst)
            .run_quiet()
            .unwrap();
        let expected: Vec<Point> = [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
            (4, 4),
        ]
        .into_iter()
        .map(Point::from)
        .collect();
        assert_eq!(outcome.path().unwrap().points(), expected.as_slice());
    }

    #[test]
    fn dfs_follows_last_pushed_neighbor() {
        let g = open_grid(5, 5, Point::new(0, 0), Point::new(4, 4));
        let outcome = Search::new(&g, Strategy::DepthFirst).run_quiet().unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(path.steps(), 16);
        assert_eq!(path.points()[1], Point::new(0, 1));
        assert_eq!(path.points()[4], Point::new(0, 4));
    }

    #[test]
    fn bfs_discovery_order_follows_neighbor_order() {
        let g = open_grid(3, 3, Point::new(1, 1), Point::new(2, 2));
        let (_, trace) = run_traced(&g, Strategy::BreadthFirst);
        assert_eq!(
            &trace[..4],
            &[
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ]
        );
    }

    #[test]
    fn start_equals_goal() {
        let g = open_grid(3, 3, Point::new(1, 1), Point::new(1, 1));
        for s in Strategy::ALL {
            let (outcome, trace) = run_traced(&g, s);
            let path = outcome.path().unwrap();
            assert_eq!(path.points(), &[Point::new(1, 1)]);
            let stats = outcome.stats().unwrap();
            assert_eq!(stats.path_length, 0);
            assert_eq!(stats.visited_count, 0);
            assert_eq!(stats.max_frontier_size, 1);
            assert!(trace.is_empty());
        }
    }

    #[test]
    fn walled_off_goal_scenario() {
        let mut g = open_grid(5, 5, Point::new(0, 0), Point::new(4, 4));
        for y in 0..5 {
            g.set_wall(Point::new(2, y)).unwrap();
        }
        let component = distances(&g, Point::new(0, 0));
        assert_eq!(component.len(), 10);
        for s in Strategy::ALL {
            let (outcome, trace) = run_traced(&g, s);
            let SearchOutcome::NotFound { stats } = outcome else {
                panic!("{s}: expected NotFound");
            };
            assert!(!stats.found);
            assert_eq!(stats.path_length, 0);
            assert_eq!(stats.visited_count, component.len() - 1, "{s}");
            let seen: HashSet<Point> = trace.iter().copied().collect();
            assert_eq!(seen.len(), trace.len(), "{s}: duplicate visit");
            let expected: HashSet<Point> = component
                .keys()
                .copied()
                .filter(|&p| p != Point::new(0, 0))
                .collect();
            assert_eq!(seen, expected, "{s}");
        }
    }

    #[test]
    fn astar_superseded_entry_counts_toward_max_frontier() {
        // (1, 2) is first pushed with g = 5 via (2, 2), then improved to
        // g = 3 via (1, 1). The old entry stays queued until popped.
        let g = mapfile::parse(
            "rows 6\ncols 4\nstart 2,0\ngoal 3,4\n....\n..@.\n@...\n..@@\n.@..\n....\n",
        )
        .unwrap();
        let (outcome, trace) = run_traced(&g, Strategy::AStar);
        let SearchOutcome::Found { path, stats } = outcome else {
            panic!("expected Found");
        };
        assert_valid_path(&g, &path);
        assert_eq!(path.steps(), 11);
        assert_eq!(path.points()[3], Point::new(1, 2));
        assert_eq!(stats.visited_count, 18);
        assert_eq!(stats.max_frontier_size, 4);
        assert_eq!(
            trace.iter().filter(|&&p| p == Point::new(1, 2)).count(),
            1
        );
    }

    #[test]
    fn optimality_and_validity_on_mazes() {
        for seed in 0..8u64 {
            let mut mg = MapGen::new(StdRng::seed_from_u64(seed));
            let g = mg.maze(15, 21).unwrap();
            let shortest = distances(&g, g.start().unwrap())[&g.goal().unwrap()];
            for s in Strategy::ALL {
                let outcome = Search::new(&g, s).run_quiet().unwrap();
                let path = outcome.path().unwrap_or_else(|| panic!("{s} seed {seed}"));
                assert_valid_path(&g, path);
                if s.is_optimal() {
                    assert_eq!(path.steps(), shortest, "{s} seed {seed}");
                } else {
                    assert!(path.steps() >= shortest, "{s} seed {seed}");
                }
            }
        }
    }

    #[test]
    fn scatter_maps_agree_on_reachability() {
        for seed in 0..12u64 {
            let mut mg = MapGen::new(StdRng::seed_from_u64(seed));
            let g = mg.scatter(12, 12, 0.35).unwrap();
            let reach = distances(&g, g.start().unwrap());
            let goal = g.goal().unwrap();
            for s in Strategy::ALL {
                let (outcome, trace) = run_traced(&g, s);
                match reach.get(&goal) {
                    Some(&d) => {
                        let path = outcome.path().unwrap();
                        assert_valid_path(&g, path);
                        if s.is_optimal() {
                            assert_eq!(path.steps(), d, "{s} seed {seed}");
                        }
                    }
                    None => {
                        assert!(!outcome.is_found());
                        assert_eq!(trace.len() + 1, reach.len(), "{s} seed {seed}");
                        let stats = outcome.stats().unwrap();
                        assert_eq!(stats.visited_count, reach.len() - 1);
                    }
                }
            }
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let mut mg = MapGen::new(StdRng::seed_from_u64(7));
        let g = mg.maze(21, 21).unwrap();
        for s in Strategy::ALL {
            let (a, trace_a) = run_traced(&g, s);
            let (b, trace_b) = run_traced(&g, s);
            assert_eq!(a.path(), b.path(), "{s}");
            assert_eq!(trace_a, trace_b, "{s}");
        }
    }

    #[test]
    fn statistics_match_trace() {
        let g = mapfile::parse(
            "rows 4\ncols 6\nstart 0,0\ngoal 5,3\n......\n.@@@@.\n.@....\n...@..\n",
        )
        .unwrap();
        for s in Strategy::ALL {
            let (outcome, trace) = run_traced(&g, s);
            let stats = outcome.stats().unwrap();
            assert_eq!(stats.visited_count, trace.len(), "{s}");
            assert!(stats.max_frontier_size >= 1);
            assert_eq!(stats.strategy, s);
            assert_eq!(
                stats.path_length,
                outcome.path().unwrap().len() - 2,
                "{s}"
            );
        }
    }

    #[test]
    fn map_id_is_recorded() {
        let g = open_grid(2, 2, Point::new(0, 0), Point::new(1, 1));
        let outcome = Search::new(&g, Strategy::Dijkstra)
            .map_id("tiny.txt")
            .run_quiet()
            .unwrap();
        assert_eq!(
            outcome.stats().unwrap().map_identifier.as_deref(),
            Some("tiny.txt")
        );
    }

    #[test]
    fn cancellation_stops_immediately() {
        let g = open_grid(10, 10, Point::new(0, 0), Point::new(9, 9));
        for s in Strategy::ALL {
            let mut polls = 0;
            let mut visits = 0;
            let outcome = Search::new(&g, s)
                .run(&mut |_: Point| visits += 1, &mut || {
                    polls += 1;
                    polls > 3
                })
                .unwrap();
            assert_eq!(outcome, SearchOutcome::Canceled, "{s}");
            assert!(outcome.stats().is_none());
            assert_eq!(polls, 4);
            // Three expansions, at most four new cells each.
            assert!(visits <= 12);
        }
    }

    #[test]
    fn cancel_before_first_step() {
        let g = open_grid(3, 3, Point::new(0, 0), Point::new(0, 0));
        let outcome = Search::new(&g, Strategy::BreadthFirst)
            .run(&mut NoVisit, &mut || true)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Canceled);
    }
}
