use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use gridpath_core::{Cell, Grid, Point};
use rand::{Rng, RngExt};

/// Carving directions: down, right, up, left.
const DIRS: [Point; 4] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
];

/// Errors that can occur when generating a map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapGenError {
    /// The requested grid is smaller than the generator supports.
    TooSmall { rows: i32, cols: i32, min: i32 },
    /// Obstacle density outside `0.0..=1.0`.
    InvalidDensity(f64),
}

impl fmt::Display for MapGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { rows, cols, min } => {
                write!(f, "mapgen: {rows}x{cols} is too small (minimum {min}x{min})")
            }
            Self::InvalidDensity(d) => {
                write!(f, "mapgen: density {d} is outside 0.0..=1.0")
            }
        }
    }
}

impl std::error::Error for MapGenError {}

/// Map generator driven by a random number generator.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a maze.
    ///
    /// The grid starts as solid wall. Passages are carved on the odd lattice
    /// from `(1, 1)` by recursive backtracking, keeping the outer border
    /// intact. Start is `(1, 1)` and goal is `(cols - 2, rows - 2)`; when the
    /// goal falls off the lattice (even dimensions) the shortest route to the
    /// carved passages is opened so the maze stays solvable.
    pub fn maze(&mut self, rows: i32, cols: i32) -> Result<Grid, MapGenError> {
        const MIN: i32 = 3;
        if rows < MIN || cols < MIN {
            return Err(MapGenError::TooSmall {
                rows,
                cols,
                min: MIN,
            });
        }
        let mut grid = Grid::filled(rows, cols, Cell::WALL);
        let interior = |p: Point| p.x >= 1 && p.y >= 1 && p.x <= cols - 2 && p.y <= rows - 2;

        let start = Point::new(1, 1);
        let goal = Point::new(cols - 2, rows - 2);
        let _ = grid.erase(start);

        let mut stack = vec![start];
        let mut candidates: Vec<(Point, Point)> = Vec::with_capacity(4);
        while let Some(&p) = stack.last() {
            candidates.clear();
            for d in DIRS {
                let n = p.shift(d.x * 2, d.y * 2);
                if interior(n) && !grid.is_traversable(n) {
                    candidates.push((n, d));
                }
            }
            if candidates.is_empty() {
                stack.pop();
                continue;
            }
            let (n, d) = candidates[self.rng.random_range(0..candidates.len())];
            let _ = grid.erase(p + d);
            let _ = grid.erase(n);
            stack.push(n);
        }

        connect(&mut grid, start, goal, interior);
        let _ = grid.set_start(start);
        let _ = grid.set_goal(goal);
        log::debug!("Generated {rows}x{cols} maze");
        Ok(grid)
    }

    /// Generate an open field where every cell other than the start `(0, 0)`
    /// and goal `(cols - 1, rows - 1)` is a wall with probability `density`.
    ///
    /// The result is not guaranteed to be solvable.
    pub fn scatter(&mut self, rows: i32, cols: i32, density: f64) -> Result<Grid, MapGenError> {
        if rows < 1 || cols < 1 {
            return Err(MapGenError::TooSmall { rows, cols, min: 1 });
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(MapGenError::InvalidDensity(density));
        }
        let mut grid = Grid::new(rows, cols);
        let start = Point::new(0, 0);
        let goal = Point::new(cols - 1, rows - 1);
        for p in grid.bounds() {
            if p != start && p != goal && self.rng.random_bool(density) {
                let _ = grid.set_wall(p);
            }
        }
        let _ = grid.set_start(start);
        let _ = grid.set_goal(goal);
        log::debug!("Generated {rows}x{cols} obstacle field at density {density}");
        Ok(grid)
    }
}

/// Cells reachable from `from` through open cells.
fn reachable(grid: &Grid, from: Point) -> HashSet<Point> {
    let mut seen = HashSet::from([from]);
    let mut stack = vec![from];
    while let Some(p) = stack.pop() {
        for n in grid.neighbors(p) {
            if seen.insert(n) {
                stack.push(n);
            }
        }
    }
    seen
}

/// Open the shortest interior route from `goal` to the region reachable
/// from `start`, ignoring walls. No-op if already connected.
fn connect(grid: &mut Grid, start: Point, goal: Point, interior: impl Fn(Point) -> bool) {
    let region = reachable(grid, start);
    if region.contains(&goal) {
        return;
    }
    let mut prev: HashMap<Point, Point> = HashMap::new();
    let mut queue = VecDeque::from([goal]);
    let mut hit = None;
    'bfs: while let Some(p) = queue.pop_front() {
        for n in p.neighbors_4() {
            if !interior(n) || n == goal || prev.contains_key(&n) {
                continue;
            }
            prev.insert(n, p);
            if region.contains(&n) {
                hit = Some(n);
                break 'bfs;
            }
            queue.push_back(n);
        }
    }
    let mut cur = hit;
    while let Some(p) = cur {
        let _ = grid.erase(p);
        cur = prev.get(&p).copied();
    }
    let _ = grid.erase(goal);
}
