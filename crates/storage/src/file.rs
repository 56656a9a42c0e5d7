//! Reading and writing the registry files.

use crate::error::{Result, StoreError};
use flagreg_core::{EnvironmentSet, FlagRegistry};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, error};

/// Load and parse the flag registry.
///
/// A file that exists but does not hold a valid registry is reported as
/// [`StoreError::RegistryParse`]; the underlying parse error is logged first.
pub fn load_registry(path: &Path) -> Result<FlagRegistry> {
    let contents = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;

    serde_json::from_str(&contents).map_err(|source| {
        error!(path = %path.display(), error = %source, "failed to parse flag registry");
        StoreError::RegistryParse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Load the list of known environments.
pub fn load_environments(path: &Path) -> Result<EnvironmentSet> {
    let contents = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let environments: EnvironmentSet = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), environments = ?environments.names(), "loaded environments");
    Ok(environments)
}

/// Render the registry as it is stored on disk: keys sorted, two-space
/// indentation, trailing newline.
pub fn render_registry(registry: &FlagRegistry) -> Result<String> {
    let mut out = serde_json::to_string_pretty(registry)?;
    out.push('\n');
    Ok(out)
}

/// Write the registry to `path`, replacing any existing file.
pub fn write_registry(path: &Path, registry: &FlagRegistry) -> Result<()> {
    debug!(path = %path.display(), state = ?registry, "writing flag registry");
    let contents = render_registry(registry)?;
    write_atomic(path, &contents)
}

/// Replace a file's contents.
///
/// Existing files are replaced by writing a temporary file next to them and
/// renaming it over the target, keeping the target's permissions. New files
/// are written directly.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return fs::write(path, contents).map_err(|e| StoreError::io(path, e)),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file()
        .set_permissions(metadata.permissions())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const REGISTRY: &str = r#"{
  "zebra": {
    "createdBy": "alice",
    "createdAt": "2024-01-01T00:00:00.000Z",
    "prod": {
      "enabled": false,
      "lastEditedBy": "alice",
      "lastEditedAt": "2024-01-01T00:00:00.000Z"
    }
  },
  "apple": {
    "createdBy": "bob",
    "createdAt": "2024-01-02T00:00:00.000Z",
    "prod": {
      "enabled": true,
      "lastEditedBy": "bob",
      "lastEditedAt": "2024-01-02T00:00:00.000Z"
    }
  }
}"#;

    #[test]
    fn test_load_registry() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("flags.json");
        fs::write(&path, REGISTRY).unwrap();

        let registry = load_registry(&path).unwrap();
        assert_eq!(registry.names(), vec!["apple", "zebra"]);
        assert!(registry.get("apple").unwrap().is_enabled_in("prod"));
    }

    #[test]
    fn test_load_invalid_json() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("flags.json");
        fs::write(&path, "{ not json").unwrap();

        let result = load_registry(&path);
        assert!(matches!(result, Err(StoreError::RegistryParse { .. })));
    }

    #[test]
    fn test_load_entry_with_extra_key() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("flags.json");
        fs::write(
            &path,
            r#"{"a":{"createdBy":"x","createdAt":"t","description":"hello","prod":{"enabled":true,"lastEditedBy":"x","lastEditedAt":"t"}}}"#,
        )
        .unwrap();

        let registry = load_registry(&path).unwrap();
        let entry = registry.get("a").unwrap();
        assert!(entry.is_enabled_in("prod"));
        assert_eq!(entry.extra["description"], "hello");

        write_registry(&path, &registry).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"description\": \"hello\""));
    }

    #[test]
    fn test_load_environment_with_only_enabled() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("flags.json");
        fs::write(&path, r#"{"a":{"createdBy":"x","createdAt":"t","prod":{"enabled":true}}}"#).unwrap();

        let registry = load_registry(&path).unwrap();
        let prod = registry.get("a").unwrap().environment("prod").unwrap();
        assert!(prod.enabled);
        assert!(prod.last_edited_by.is_none());
    }

    #[test]
    fn test_load_wrong_shape() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("flags.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = load_registry(&path);
        assert!(matches!(result, Err(StoreError::RegistryParse { .. })));
    }

    #[test]
    fn test_load_missing_file_is_io() {
        let tmp = tempdir().unwrap();
        let result = load_registry(&tmp.path().join("flags.json"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_write_sorted_and_idempotent() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("flags.json");
        fs::write(&path, REGISTRY).unwrap();

        let registry = load_registry(&path).unwrap();
        write_registry(&path, &registry).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        assert!(first.find("\"apple\"").unwrap() < first.find("\"zebra\"").unwrap());
        assert!(first.starts_with("{\n  \"apple\": {\n    \"createdBy\": \"bob\","));
        assert!(first.ends_with("}\n"));

        let reloaded = load_registry(&path).unwrap();
        write_registry(&path, &reloaded).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_empty_registry() {
        assert_eq!(render_registry(&FlagRegistry::new()).unwrap(), "{}\n");
    }

    #[test]
    fn test_load_environments_missing_is_io() {
        let tmp = tempdir().unwrap();
        let result = load_environments(&tmp.path().join("environments.json"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_load_environments_bad_json_is_generic() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("environments.json");
        fs::write(&path, "nope").unwrap();

        let result = load_environments(&path);
        assert!(matches!(result, Err(StoreError::Json(_))));
    }

    #[test]
    fn test_write_atomic_replaces_and_creates() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.txt");

        write_atomic(&path, "first").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        write_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        let leftovers = fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
