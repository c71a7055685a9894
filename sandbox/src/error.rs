use std::fmt;
use std::io;

use gridpath_core::MapError;
use gridpath_mapgen::MapGenError;
use gridpath_search::PreconditionError;

/// Everything that can go wrong while serving a sandbox command.
#[derive(Debug)]
pub enum SandboxError {
    Map(MapError),
    MapGen(MapGenError),
    Precondition(PreconditionError),
    /// Writing output or statistics failed.
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(e) => e.fmt(f),
            Self::MapGen(e) => e.fmt(f),
            Self::Precondition(e) => e.fmt(f),
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for SandboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            Self::MapGen(e) => Some(e),
            Self::Precondition(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<MapError> for SandboxError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

impl From<MapGenError> for SandboxError {
    fn from(e: MapGenError) -> Self {
        Self::MapGen(e)
    }
}

impl From<PreconditionError> for SandboxError {
    fn from(e: PreconditionError) -> Self {
        Self::Precondition(e)
    }
}

impl From<io::Error> for SandboxError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SandboxError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
