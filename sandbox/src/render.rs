//! Text rendering of a grid and a search trace.

use std::collections::HashSet;

use gridpath_core::{Grid, Point};
use gridpath_search::{Path, VisitSink};

const VISITED: char = '+';
const PATH: char = '*';
const START: char = 'S';
const GOAL: char = 'G';

/// Records discovered cells in order and draws them over a grid.
///
/// Markers take precedence over the path, the path over visited cells.
#[derive(Debug, Default, Clone)]
pub struct TraceRenderer {
    order: Vec<Point>,
    seen: HashSet<Point>,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovered cells, in discovery order.
    pub fn visited(&self) -> &[Point] {
        &self.order
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    pub fn render(&self, grid: &Grid, path: Option<&Path>) -> String {
        let on_path: HashSet<Point> = path
            .map(|p| p.iter().copied().collect())
            .unwrap_or_default();
        let mut out = String::with_capacity((grid.cols() as usize + 1) * grid.rows() as usize);
        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                let p = Point::new(x, y);
                let ch = if grid.start() == Some(p) {
                    START
                } else if grid.goal() == Some(p) {
                    GOAL
                } else if on_path.contains(&p) {
                    PATH
                } else if self.seen.contains(&p) {
                    VISITED
                } else {
                    grid.at(p).map_or(' ', |c| c.to_char())
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl VisitSink for TraceRenderer {
    fn visit(&mut self, p: Point) {
        if self.seen.insert(p) {
            self.order.push(p);
        }
    }
}
