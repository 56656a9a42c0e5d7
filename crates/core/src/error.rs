//! Errors raised while resolving an edit.

use thiserror::Error;

/// Errors that can occur when applying an edit to a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("flag not found: {0}")]
    UnknownFlag(String),

    #[error("flag already exists: {0}")]
    DuplicateFlag(String),

    #[error("invalid flag name {name:?}: {reason}")]
    InvalidFlagName { name: String, reason: &'static str },

    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),
}

/// Result type for edit operations.
pub type Result<T> = std::result::Result<T, EditError>;
