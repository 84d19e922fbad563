//! Serialization dialects for tool configuration files.
//!
//! Tool configs come in two dialects: JSON object trees (most tools) and
//! TOML table trees (Codex). [`ConfigTree`] abstracts over both so the
//! schema layer can read and edit server entries without caring which
//! dialect backs them.
//!
//! # Round-trip preservation
//!
//! Config files are owned by their tools and often hand-edited, so edits
//! must disturb the rest of the file as little as possible:
//!
//! - TOML documents go through [`toml_edit::DocumentMut`], which preserves
//!   formatting, comments, and key order exactly.
//! - JSON values keep their key order (serde_json's `preserve_order`) and
//!   re-emit pretty-printed at two-space indent, matching how the tools
//!   themselves write these files. Whitespace of hand-minified files is
//!   not preserved.
//!
//! # Absent vs. malformed
//!
//! An absent config file means "this tool has nothing configured" and
//! [`load`] yields an empty tree. A file that exists but does not parse is
//! an error; AXM never rewrites a file it could not fully parse.

use crate::core::AxmError;
use serde_json::Value;
use std::path::Path;
use toml_edit::DocumentMut;

/// The serialization dialect a tool uses for its config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigDialect {
    /// JSON object tree
    Json,
    /// TOML table tree
    Toml,
}

/// A parsed configuration document in either dialect.
#[derive(Debug, Clone)]
pub enum ConfigTree {
    /// JSON document; the root is always an object
    Object(Value),
    /// TOML document with formatting preserved
    Table(DocumentMut),
}

impl ConfigTree {
    /// An empty tree of the given dialect.
    #[must_use]
    pub fn empty(dialect: ConfigDialect) -> Self {
        match dialect {
            ConfigDialect::Json => Self::Object(Value::Object(serde_json::Map::new())),
            ConfigDialect::Toml => Self::Table(DocumentMut::new()),
        }
    }

    /// The dialect this tree belongs to.
    #[must_use]
    pub const fn dialect(&self) -> ConfigDialect {
        match self {
            Self::Object(_) => ConfigDialect::Json,
            Self::Table(_) => ConfigDialect::Toml,
        }
    }
}

/// Parse config file content in the given dialect.
///
/// Empty or whitespace-only content yields an empty tree. Malformed
/// content yields [`AxmError::ConfigParse`] naming `path` (the path is
/// used only for error reporting; no IO happens here).
pub fn parse(content: &str, dialect: ConfigDialect, path: &Path) -> Result<ConfigTree, AxmError> {
    if content.trim().is_empty() {
        return Ok(ConfigTree::empty(dialect));
    }

    match dialect {
        ConfigDialect::Json => {
            let value: Value =
                serde_json::from_str(content).map_err(|e| AxmError::ConfigParse {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            if !value.is_object() {
                return Err(AxmError::ConfigParse {
                    path: path.display().to_string(),
                    reason: "root of the document is not an object".to_string(),
                });
            }
            Ok(ConfigTree::Object(value))
        }
        ConfigDialect::Toml => {
            let doc = content.parse::<DocumentMut>().map_err(|e| AxmError::ConfigParse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            Ok(ConfigTree::Table(doc))
        }
    }
}

/// Load a config file, treating an absent file as an empty configuration.
///
/// A file that exists but cannot be read or parsed is an error.
pub fn load(path: &Path, dialect: ConfigDialect) -> Result<ConfigTree, AxmError> {
    if !path.exists() {
        return Ok(ConfigTree::empty(dialect));
    }

    let content = std::fs::read_to_string(path)?;
    parse(&content, dialect, path)
}

/// Serialize a tree back to config file content.
///
/// JSON is pretty-printed at two-space indent with key order preserved;
/// TOML reproduces the original formatting byte for byte.
#[must_use]
pub fn serialize(tree: &ConfigTree) -> String {
    match tree {
        // to_string_pretty only fails for non-string map keys, which Value cannot hold
        ConfigTree::Object(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
        }
        ConfigTree::Table(doc) => doc.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_yields_empty_tree() {
        let tree = parse("", ConfigDialect::Json, Path::new("a.json")).unwrap();
        assert!(matches!(tree, ConfigTree::Object(Value::Object(ref m)) if m.is_empty()));

        let tree = parse("  \n\t ", ConfigDialect::Toml, Path::new("a.toml")).unwrap();
        assert!(matches!(tree, ConfigTree::Table(_)));
    }

    #[test]
    fn test_absent_file_is_empty_tree() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("does-not-exist.json");

        let tree = load(&missing, ConfigDialect::Json).unwrap();
        assert_eq!(serialize(&tree), "{}");
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse("{ not json", ConfigDialect::Json, Path::new("bad.json")).unwrap_err();
        match err {
            AxmError::ConfigParse { path, .. } => assert_eq!(path, "bad.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_object_json_root_rejected() {
        let err = parse("[1, 2]", ConfigDialect::Json, Path::new("arr.json")).unwrap_err();
        assert!(matches!(err, AxmError::ConfigParse { .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse("[unclosed\n", ConfigDialect::Toml, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, AxmError::ConfigParse { .. }));
    }

    #[test]
    fn test_json_round_trip_preserves_key_order() {
        let input = "{\n  \"zeta\": 1,\n  \"alpha\": {\n    \"keep\": true\n  }\n}";
        let tree = parse(input, ConfigDialect::Json, Path::new("a.json")).unwrap();
        assert_eq!(serialize(&tree), input);
    }

    #[test]
    fn test_toml_round_trip_preserves_comments() {
        let input = "# model settings\nmodel = \"o3\"\n\n[mcp_servers.mem]\ncommand = \"npx\"\n";
        let tree = parse(input, ConfigDialect::Toml, Path::new("c.toml")).unwrap();
        assert_eq!(serialize(&tree), input);
    }
}
