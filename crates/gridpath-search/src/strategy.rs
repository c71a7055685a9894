//! The five exploration-order policies, as one tagged variant.

use std::fmt;
use std::str::FromStr;

use gridpath_core::Point;

use crate::distance::manhattan;

/// How the frontier hands out the next coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// First in, first out.
    Fifo,
    /// Last in, first out.
    Lifo,
    /// Smallest priority key first; ties in push order.
    MinPriority,
}

/// When a neighbor is (re)admitted to the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Only the first time it is discovered.
    Unvisited,
    /// Whenever the new path cost `g` beats the best known one.
    ImprovesCost,
}

/// A grid search strategy.
///
/// | Strategy | Pop order | Admission | Priority key | Optimal |
/// |---|---|---|---|---|
/// | [`BreadthFirst`](Self::BreadthFirst) | FIFO | unvisited | – | yes |
/// | [`DepthFirst`](Self::DepthFirst) | LIFO | unvisited | – | no |
/// | [`Dijkstra`](Self::Dijkstra) | min | improves `g` | `g` | yes |
/// | [`AStar`](Self::AStar) | min | improves `g` | `g + h` | yes |
/// | [`GreedyBestFirst`](Self::GreedyBestFirst) | min | unvisited | `h` | no |
///
/// `h` is the Manhattan distance to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    AStar,
    GreedyBestFirst,
}

impl Strategy {
    /// Every strategy.
    pub const ALL: [Strategy; 5] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::Dijkstra,
        Strategy::AStar,
        Strategy::GreedyBestFirst,
    ];

    /// Name recorded in statistics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "BFS",
            Self::DepthFirst => "DFS",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
            Self::GreedyBestFirst => "Greedy-BeFs",
        }
    }

    pub const fn discipline(self) -> Discipline {
        match self {
            Self::BreadthFirst => Discipline::Fifo,
            Self::DepthFirst => Discipline::Lifo,
            Self::Dijkstra | Self::AStar | Self::GreedyBestFirst => Discipline::MinPriority,
        }
    }

    pub const fn admission(self) -> Admission {
        match self {
            Self::BreadthFirst | Self::DepthFirst | Self::GreedyBestFirst => Admission::Unvisited,
            Self::Dijkstra | Self::AStar => Admission::ImprovesCost,
        }
    }

    /// Priority key of a neighbor `p` reached with path cost `g`.
    ///
    /// FIFO and LIFO strategies ignore the key.
    pub fn priority(self, g: i32, p: Point, goal: Point) -> i32 {
        match self {
            Self::BreadthFirst | Self::DepthFirst => 0,
            Self::Dijkstra => g,
            Self::AStar => g + manhattan(p, goal),
            Self::GreedyBestFirst => manhattan(p, goal),
        }
    }

    /// Whether the strategy always returns a shortest path on unit-cost grids.
    pub const fn is_optimal(self) -> bool {
        matches!(self, Self::BreadthFirst | Self::Dijkstra | Self::AStar)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy {:?} (expected bfs, dfs, dijkstra, astar or greedy)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::BreadthFirst),
            "dfs" | "depth-first" => Ok(Self::DepthFirst),
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "greedy" | "greedy-befs" | "best-first" => Ok(Self::GreedyBestFirst),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
