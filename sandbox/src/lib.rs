//! Command-line sandbox around the grid search engine: loads maps, runs
//! strategies, renders traces and appends run statistics to a CSV file.

pub mod app;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod results;

pub use cancel::Deadline;
pub use config::SandboxConfig;
pub use error::SandboxError;
pub use render::TraceRenderer;
pub use results::CsvStatsSink;
