//! Finding the registry by walking up from a starting directory.

use crate::error::{Result, StoreError};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default name of the directory holding the registry files.
pub const CONFIG_DIRECTORY: &str = "features";
/// Registry file name.
pub const FLAGS_FILENAME: &str = "flags.json";
/// Environment list file name.
pub const ENVIRONMENTS_FILENAME: &str = "environments.json";
/// Generated declaration file name.
pub const TYPEDEF_FILENAME: &str = "features.d.ts";

/// A resolved config directory and the files inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryLocation {
    config_dir: PathBuf,
}

impl RegistryLocation {
    /// Wrap an existing config directory.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The directory containing the config directory.
    pub fn project_root(&self) -> Option<&Path> {
        self.config_dir.parent()
    }

    pub fn flags_path(&self) -> PathBuf {
        self.config_dir.join(FLAGS_FILENAME)
    }

    pub fn environments_path(&self) -> PathBuf {
        self.config_dir.join(ENVIRONMENTS_FILENAME)
    }

    pub fn typedef_path(&self) -> PathBuf {
        self.config_dir.join(TYPEDEF_FILENAME)
    }
}

/// Find the nearest `<dir>/<config_dir_name>/flags.json`, checking `start`
/// first and then each ancestor up to and including the filesystem root.
///
/// Relative `start` paths are resolved against the current directory.
pub fn locate(start: &Path, config_dir_name: &str) -> Result<RegistryLocation> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        env::current_dir()
            .map_err(|e| StoreError::io(start, e))?
            .join(start)
    };

    for dir in start.ancestors() {
        let config_dir = dir.join(config_dir_name);
        if config_dir.join(FLAGS_FILENAME).is_file() {
            debug!(config_dir = %config_dir.display(), "found flag registry");
            return Ok(RegistryLocation::new(config_dir));
        }
    }

    Err(StoreError::RegistryNotFound {
        start,
        file: Path::new(config_dir_name).join(FLAGS_FILENAME),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_registry(root: &Path) {
        let config = root.join(CONFIG_DIRECTORY);
        fs::create_dir_all(&config).unwrap();
        fs::write(config.join(FLAGS_FILENAME), "{}").unwrap();
    }

    #[test]
    fn test_locate_in_start_dir() {
        let tmp = tempdir().unwrap();
        make_registry(tmp.path());

        let location = locate(tmp.path(), CONFIG_DIRECTORY).unwrap();
        assert_eq!(location.config_dir(), tmp.path().join(CONFIG_DIRECTORY));
        assert_eq!(location.project_root(), Some(tmp.path()));
    }

    #[test]
    fn test_locate_three_levels_down() {
        let tmp = tempdir().unwrap();
        make_registry(tmp.path());
        let deep = tmp.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();

        let location = locate(&deep, CONFIG_DIRECTORY).unwrap();
        assert_eq!(
            location.flags_path(),
            tmp.path().join(CONFIG_DIRECTORY).join(FLAGS_FILENAME)
        );
        assert_eq!(
            location.typedef_path(),
            tmp.path().join(CONFIG_DIRECTORY).join(TYPEDEF_FILENAME)
        );
    }

    #[test]
    fn test_nearest_registry_wins() {
        let tmp = tempdir().unwrap();
        make_registry(tmp.path());
        let inner = tmp.path().join("packages").join("app");
        make_registry(&inner);
        let start = inner.join("src");
        fs::create_dir_all(&start).unwrap();

        let location = locate(&start, CONFIG_DIRECTORY).unwrap();
        assert_eq!(location.config_dir(), inner.join(CONFIG_DIRECTORY));
    }

    #[test]
    fn test_custom_config_dir_name() {
        let tmp = tempdir().unwrap();
        let config = tmp.path().join("flags-config");
        fs::create_dir_all(&config).unwrap();
        fs::write(config.join(FLAGS_FILENAME), "{}").unwrap();

        let location = locate(tmp.path(), "flags-config").unwrap();
        assert_eq!(location.config_dir(), config);
    }

    #[test]
    fn test_not_found() {
        let tmp = tempdir().unwrap();
        let start = tmp.path().join("x").join("y");
        fs::create_dir_all(&start).unwrap();

        let result = locate(&start, "no-such-config-dir-anywhere");
        assert!(matches!(result, Err(StoreError::RegistryNotFound { .. })));
    }

    #[test]
    fn test_directory_named_flags_json_ignored() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("cfg").join(FLAGS_FILENAME)).unwrap();

        let result = locate(tmp.path(), "cfg");
        assert!(matches!(result, Err(StoreError::RegistryNotFound { .. })));
    }
}
