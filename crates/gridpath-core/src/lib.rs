//! **gridpath-core**: core types for the grid pathfinding sandbox.
//!
//! This crate provides the geometry primitives, the traversability [`Grid`]
//! that every search runs against, and the line-oriented map text format
//! ([`mapfile`]) used to persist grids.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod mapfile;

pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::{Grid, GridError};
pub use mapfile::MapError;
