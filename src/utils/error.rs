//! Error types for the derivative generator.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Per-file processing errors.
///
/// These never escape the folder worker: each one is converted into a
/// failure for the file that produced it.
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// Source could not be read or decoded
    #[error("Decode error for {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Derivative could not be encoded or written
    #[error("Write error for {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),
}

/// Convenience result type for per-file operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

// Helper methods for error creation
impl ProcessingError {
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }
}

/// Status store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing storage could not be read or written
    #[error("Store IO error: {0}")]
    Io(#[from] io::Error),

    /// Stored records could not be (de)serialized
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Batch-level errors. Anything here aborts the batch.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Structural filesystem failure (missing input root, unreadable listing)
    #[error("Filesystem error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Status store rejected a start or finalize update
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type BatchResult<T> = Result<T, BatchError>;

impl BatchError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
