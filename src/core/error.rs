//! # World Errors
//!
//! A single error type shared by the chunk manager, the chunk storage codec and
//! the configuration loader.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Errors produced by the voxel world.
///
/// None of these are fatal to the process. An allocation failure leaves the
/// affected world region unloaded until a later streaming pass asks for it again.
#[derive(Debug)]
pub enum WorldError {
    /// A chunk or the chunk collection could not acquire memory.
    Allocation,
    /// A serialized chunk buffer had the wrong length.
    InvalidChunkBytes { expected: usize, actual: usize },
    /// A configuration value is out of its valid range.
    InvalidConfig(String),
    /// Reading a configuration file failed.
    Io(std::io::Error),
    /// A configuration file was not valid JSON for `EngineConfig`.
    Json(serde_json::Error),
    /// The worker building a chunk stopped before returning it.
    WorkerStopped,
}

impl WorldError {
    /// Status code reported for a failed chunk insertion.
    pub fn status_code(&self) -> i8 {
        -1
    }
}

impl Display for WorldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::Allocation => write!(f, "Chunk allocation failed"),
            WorldError::InvalidChunkBytes { expected, actual } => {
                write!(
                    f,
                    "Invalid chunk buffer: expected {} bytes, got {}",
                    expected, actual
                )
            }
            WorldError::InvalidConfig(v) => write!(f, "Invalid configuration: {}", v),
            WorldError::Io(e) => write!(f, "I/O error: {}", e),
            WorldError::Json(e) => write!(f, "Configuration parse error: {}", e),
            WorldError::WorkerStopped => write!(f, "Chunk worker stopped before finishing"),
        }
    }
}

impl Error for WorldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldError::Io(e) => Some(e),
            WorldError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WorldError {
    fn from(e: std::io::Error) -> Self {
        WorldError::Io(e)
    }
}

impl From<serde_json::Error> for WorldError {
    fn from(e: serde_json::Error) -> Self {
        WorldError::Json(e)
    }
}

impl From<std::collections::TryReserveError> for WorldError {
    fn from(_: std::collections::TryReserveError) -> Self {
        WorldError::Allocation
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, WorldError>;
