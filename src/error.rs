//! Error types for log emission

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while emitting a log record
///
/// None of these ever abort the caller: the logger reports them through
/// `tracing` and hands them back so the embedding code can decide.
#[derive(Error, Debug)]
pub enum LogError {
    /// Log directory could not be created
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// chmod on the log file failed
    #[error("failed to set mode {mode:o} on {}: {source}", .path.display())]
    Permissions {
        path: PathBuf,
        mode: u32,
        #[source]
        source: std::io::Error,
    },

    /// Log file could not be opened for appending
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Appending to the log file failed
    #[error("failed to write log file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the terminal line failed
    #[error("failed to write to terminal: {0}")]
    Terminal(#[source] std::io::Error),

    /// A value passed to `emit_json` could not be serialized
    #[error("failed to serialize {title}: {source}")]
    Serialize {
        title: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LogError {
    /// Create a directory creation error
    pub fn create_dir(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a permission change error
    pub fn permissions(path: impl AsRef<Path>, mode: u32, source: std::io::Error) -> Self {
        Self::Permissions {
            path: path.as_ref().to_path_buf(),
            mode,
            source,
        }
    }

    /// Create a file open error
    pub fn open(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a file write error
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;
