//! Error types for footprint export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for export operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Errors that can occur while exporting a footprint.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to write the file.
    #[error("failed to write footprint file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl OutputError {
    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}
