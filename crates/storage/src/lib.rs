//! File layer for the flag editor.
//!
//! This crate finds and persists the registry:
//! - Locating `<config-dir>/flags.json` by walking up from a directory
//! - Loading flags and the environment list
//! - Writing the registry (key-sorted, atomic replace)
//! - Generating the `features.d.ts` declaration file
//!
//! # Layout
//!
//! ```text
//! <project-root>/
//! └── features/
//!     ├── flags.json          registry, rewritten on every edit
//!     ├── environments.json   environment names, read-only
//!     └── features.d.ts       generated, overwritten on every edit
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use flagreg_core::{EditRequest, EditStamp};
//! use flagreg_storage::{FlagContext, CONFIG_DIRECTORY};
//! use std::path::Path;
//!
//! let mut ctx = FlagContext::open(Path::new("."), CONFIG_DIRECTORY).unwrap();
//! let request = EditRequest::add("newFeature", vec!["prod".to_string()]);
//! ctx.apply(&request, &EditStamp::now("alice")).unwrap();
//! ctx.save().unwrap();
//! ```

pub mod context;
pub mod error;
pub mod file;
pub mod locate;
pub mod typedef;

// Re-export commonly used types
pub use context::FlagContext;
pub use error::{Result, StoreError};
pub use file::{load_environments, load_registry, render_registry, write_atomic, write_registry};
pub use locate::{
    locate, RegistryLocation, CONFIG_DIRECTORY, ENVIRONMENTS_FILENAME, FLAGS_FILENAME,
    TYPEDEF_FILENAME,
};
pub use typedef::{render_typedefs, write_typedefs};
