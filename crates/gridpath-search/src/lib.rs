//! Graph search over 4-connected traversability grids.
//!
//! Five strategies share one expansion loop ([`Search`]); they differ only
//! in frontier discipline, admission rule and priority key ([`Strategy`]):
//!
//! - **Breadth-first** (FIFO) and **Dijkstra** / **A\*** (min-priority on
//!   `g` / `g + h`) return shortest paths.
//! - **Depth-first** (LIFO) and **greedy best-first** (min-priority on `h`)
//!   return some path, usually quickly.
//!
//! A run reports each newly discovered cell to a [`VisitSink`], polls a
//! [`CancelSignal`] once per step, and ends with a [`SearchOutcome`]
//! carrying the [`Path`] and [`RunStatistics`]. Per-run state never
//! outlives the call.
//!
//! # Boundary traits
//!
//! | Trait | Role |
//! |---|---|
//! | [`VisitSink`] | discovery notifications (e.g. a renderer) |
//! | [`CancelSignal`] | cooperative abort (e.g. a window close or deadline) |
//! | [`StatsSink`] | append-only statistics persistence |

mod distance;
mod engine;
mod frontier;
mod path;
mod stats;
mod strategy;
mod traits;

pub use distance::manhattan;
pub use engine::{PreconditionError, Search, SearchOutcome};
pub use path::{Path, reconstruct};
pub use stats::{RunCounters, RunStatistics, StatsRecorder, UNKNOWN_MAP, aggregate};
pub use strategy::{Admission, Discipline, Strategy, UnknownStrategy};
pub use traits::{CancelSignal, NeverCancel, NoVisit, StatsSink, VisitSink};
