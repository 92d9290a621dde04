//! Error types for stub generation.
//!
//! Errors fall into two classes: recoverable ones, where the offending input
//! file is skipped and the run continues, and fatal ones, which abort the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, StubError>;

#[derive(Error, Debug)]
pub enum StubError {
    /// An input file could not be read. Recoverable: the file is skipped.
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file's parent directory could not be created.
    #[error("Could not create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stub file could not be written.
    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicitly requested config file is unreadable or malformed.
    #[error("Invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl StubError {
    /// True when the run can carry on after logging this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StubError::Read { .. })
    }
}
