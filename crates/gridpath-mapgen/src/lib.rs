//! Map generators for the grid pathfinding sandbox.
//!
//! - [`MapGen::maze`]: a perfect maze carved by recursive backtracking,
//!   always solvable between its fixed start and goal.
//! - [`MapGen::scatter`]: an open field with randomly placed obstacles.

mod mapgen;

pub use mapgen::{MapGen, MapGenError};
