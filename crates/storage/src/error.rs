//! Storage errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while finding, reading or writing registry files.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not find {} in {} or any parent directory", file.display(), start.display())]
    RegistryNotFound { start: PathBuf, file: PathBuf },

    #[error("failed to load JSON from {}, probably not valid JSON", path.display())]
    RegistryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
