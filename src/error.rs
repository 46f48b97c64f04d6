//! Centralized error types for mailstash.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailstash library.
#[derive(Error, Debug)]
pub enum StashError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified raw email file does not exist.
    #[error("Raw email file not found: {0}")]
    FileNotFound(PathBuf),

    /// The raw message structure could not be parsed.
    #[error("Cannot parse message '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Convenience alias for `Result<T, StashError>`.
pub type Result<T> = std::result::Result<T, StashError>;

impl StashError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `StashError`
/// when no path context is available (rare; prefer `StashError::io`).
impl From<std::io::Error> for StashError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
