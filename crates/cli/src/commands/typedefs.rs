//! Regenerate the declaration file from the current registry.

use crate::config::EditorConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use flagreg_storage::FlagContext;

pub fn run(config: &EditorConfig) -> Result<()> {
    let ctx = FlagContext::open(&config.start_dir, &config.config_dir)?;
    ctx.write_typedefs()
        .context("Failed to write the declaration file")?;

    println!(
        "{}  Regenerated {} ({} flags)",
        "✓".green().bold(),
        ctx.location.typedef_path().display().to_string().bright_black(),
        ctx.registry.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagreg_storage::CONFIG_DIRECTORY;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_regenerates_from_registry() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join(CONFIG_DIRECTORY);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("flags.json"),
            r#"{ "b": { "createdBy": "x", "createdAt": "t" }, "a": { "createdBy": "x", "createdAt": "t" } }"#,
        )
        .unwrap();
        fs::write(dir.join("environments.json"), "[]").unwrap();

        let config = EditorConfig {
            start_dir: tmp.path().to_path_buf(),
            ..EditorConfig::default()
        };
        run(&config).unwrap();

        let contents = fs::read_to_string(dir.join("features.d.ts")).unwrap();
        assert!(contents.contains("    a: boolean;\n    b: boolean;\n"));
    }
}
