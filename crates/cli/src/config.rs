//! Run configuration, assembled from command-line flags and environment.

use anyhow::{Context, Result};
use flagreg_storage::CONFIG_DIRECTORY;
use std::env;
use std::path::PathBuf;

/// Older name of the debug toggle, still honoured. Only the exact value
/// `true` turns it on.
pub const LEGACY_DEBUG_ENV: &str = "NEAR_FLAG_DEBUG";

/// Settings for one run of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Directory the registry search starts from.
    pub start_dir: PathBuf,
    /// Name of the directory holding `flags.json`.
    pub config_dir: String,
    /// Identity override; git is asked when unset.
    pub user: Option<String>,
    /// Debug logging toggle.
    pub debug: bool,
}

#[cfg(test)]
impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            start_dir: PathBuf::from("."),
            config_dir: CONFIG_DIRECTORY.to_string(),
            user: None,
            debug: false,
        }
    }
}

/// Interpret the legacy debug variable.
fn legacy_debug(value: Option<&str>) -> bool {
    value == Some("true")
}

impl EditorConfig {
    /// Build a config, defaulting the start directory to the current one.
    ///
    /// Debug logging is on when requested or when [`LEGACY_DEBUG_ENV`] is `true`.
    pub fn new(
        dir: Option<PathBuf>,
        config_dir: String,
        user: Option<String>,
        debug: bool,
    ) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => env::current_dir().context("Failed to read the current directory")?,
        };
        let start_dir = dir
            .canonicalize()
            .with_context(|| format!("Directory not found: {}", dir.display()))?;

        Ok(Self {
            start_dir,
            config_dir,
            user,
            debug: debug || legacy_debug(env::var(LEGACY_DEBUG_ENV).ok().as_deref()),
        })
    }
}
