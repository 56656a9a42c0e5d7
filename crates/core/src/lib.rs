//! Core types for the feature-flag registry.
//!
//! This crate is pure data and logic, with no file access:
//! - Flag entries and per-environment state
//! - The registry (flag name → entry, always key-sorted)
//! - The environment set
//! - Edit resolution (add, edit, remove) and its errors

pub mod edit;
pub mod environment;
pub mod error;
pub mod flag;
pub mod registry;

// Re-export commonly used types at the crate root
pub use edit::{resolve_entry, validate_flag_name, Action, EditOutcome, EditRequest, EditStamp};
pub use environment::EnvironmentSet;
pub use error::{EditError, Result};
pub use flag::{EnvironmentState, FlagEntry};
pub use registry::FlagRegistry;
