//! Generated TypeScript declaration of every flag name.

use crate::error::Result;
use crate::file::write_atomic;
use flagreg_core::FlagRegistry;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const HEADER: &str = "/* This file is generated by the flag editor util. Changes will be lost! */";

/// Whether `name` can be written as a bare TypeScript property name.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Render the declaration file: one `boolean` field per flag, sorted.
/// Names that are not plain identifiers are written as quoted keys.
pub fn render_typedefs(registry: &FlagRegistry) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(HEADER);
    out.push_str("\n\nexport type Features = {\n");
    for (name, _) in registry.iter() {
        out.push_str("    ");
        if is_identifier(name) {
            out.push_str(name);
        } else {
            out.push_str(&Value::from(name).to_string());
        }
        out.push_str(": boolean;\n");
    }
    out.push_str("};\n");
    out
}

/// Overwrite the declaration file at `path`.
pub fn write_typedefs(path: &Path, registry: &FlagRegistry) -> Result<()> {
    debug!(path = %path.display(), flags = registry.len(), "writing typedef file");
    write_atomic(path, &render_typedefs(registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagreg_core::FlagEntry;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_sorted() {
        let mut registry = FlagRegistry::new();
        registry.insert("zeta", FlagEntry::new("a", "t"));
        registry.insert("alpha", FlagEntry::new("a", "t"));

        let expected = "\n\
/* This file is generated by the flag editor util. Changes will be lost! */\n\
\n\
export type Features = {\n    alpha: boolean;\n    zeta: boolean;\n};\n";
        assert_eq!(render_typedefs(&registry), expected);
    }

    #[test]
    fn test_render_quotes_non_identifiers() {
        let mut registry = FlagRegistry::new();
        registry.insert("my-flag", FlagEntry::new("a", "t"));
        registry.insert("1st", FlagEntry::new("a", "t"));
        registry.insert("plain_$1", FlagEntry::new("a", "t"));

        let rendered = render_typedefs(&registry);
        assert!(rendered.contains("    \"1st\": boolean;\n"));
        assert!(rendered.contains("    \"my-flag\": boolean;\n"));
        assert!(rendered.contains("    plain_$1: boolean;\n"));
    }

    #[test]
    fn test_render_empty() {
        let rendered = render_typedefs(&FlagRegistry::new());
        assert!(rendered.ends_with("export type Features = {\n};\n"));
    }

    #[test]
    fn test_write_overwrites() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("features.d.ts");
        fs::write(&path, "hand edits").unwrap();

        let mut registry = FlagRegistry::new();
        registry.insert("beta", FlagEntry::new("a", "t"));
        write_typedefs(&path, &registry).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("hand edits"));
        assert!(contents.contains("    beta: boolean;\n"));
    }
}
