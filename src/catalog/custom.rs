//! Persistence for the user's custom catalog entries.
//!
//! Custom entries live in a single JSON array at `~/.axm/plugins.json`.
//! The location can be overridden with the `AXM_PLUGINS_PATH` environment
//! variable, which tests use to point at temporary directories.
//!
//! Loading is deliberately forgiving: a missing file is an empty catalog,
//! and entries that fail to deserialize are dropped with a warning rather
//! than poisoning the whole list. Writes go through the atomic write path.

use super::CatalogEntry;
use crate::utils::fs::{read_text_file, write_json_file};
use crate::utils::platform::get_home_dir;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// The user-maintained half of the catalog.
#[derive(Debug, Clone, Default)]
pub struct CustomCatalog {
    /// Custom entries in stored order (newest first)
    pub entries: Vec<CatalogEntry>,
    path: PathBuf,
}

impl CustomCatalog {
    /// Default storage path: `~/.axm/plugins.json`, or the value of
    /// `AXM_PLUGINS_PATH` when set.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("AXM_PLUGINS_PATH") {
            return Ok(PathBuf::from(path));
        }
        Ok(get_home_dir()?.join(".axm").join("plugins.json"))
    }

    /// Load the custom catalog from the default location.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::default_path()?))
    }

    /// Load from a specific path. Never fails: a missing or unreadable file
    /// yields an empty catalog, and malformed entries are skipped with a
    /// warning.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let mut catalog = Self { entries: Vec::new(), path: path.to_path_buf() };

        if !path.exists() {
            return catalog;
        }

        let content = match read_text_file(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read custom catalog");
                return catalog;
            }
        };

        let raw: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "custom catalog is not a JSON array");
                return catalog;
            }
        };

        for value in raw {
            match serde_json::from_value::<CatalogEntry>(value) {
                Ok(entry) => catalog.entries.push(entry),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "dropping malformed custom entry");
                }
            }
        }

        catalog
    }

    /// Persist the catalog atomically to its backing file.
    pub fn save(&self) -> Result<()> {
        write_json_file(&self.path, &self.entries)
            .with_context(|| format!("Failed to save custom catalog to {}", self.path.display()))
    }

    /// Generate a fresh key for a new custom entry.
    #[must_use]
    pub fn generate_key() -> String {
        format!("custom-{}", chrono::Utc::now().timestamp_millis())
    }

    /// Insert a new entry at the front, or replace the entry with the same
    /// key in place.
    pub fn upsert(&mut self, entry: CatalogEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.insert(0, entry),
        }
    }

    /// Remove an entry by key. Returns the removed entry, if any.
    pub fn remove(&mut self, key: &str) -> Option<CatalogEntry> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index))
    }

    /// Look up a custom entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PluginKind;

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let catalog = CustomCatalog::load_from(&temp.path().join("plugins.json"));
        assert!(catalog.entries.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("plugins.json");

        let mut catalog = CustomCatalog::load_from(&path);
        let mut entry = CatalogEntry::new("custom-1", PluginKind::Mcp);
        entry.url = Some("npx -y my-server".to_string());
        entry.is_custom = true;
        catalog.upsert(entry.clone());
        catalog.save().unwrap();

        let reloaded = CustomCatalog::load_from(&path);
        assert_eq!(reloaded.entries, vec![entry]);
    }

    #[test]
    fn test_malformed_entries_are_dropped() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("plugins.json");

        // Second element is missing required fields
        std::fs::write(
            &path,
            r#"[
              {"key": "ok", "type": "mcp", "isCustom": true},
              {"name": "no key or type"},
              {"key": "also-ok", "type": "skill"}
            ]"#,
        )
        .unwrap();

        let catalog = CustomCatalog::load_from(&path);
        let keys: Vec<&str> = catalog.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["ok", "also-ok"]);
    }

    #[test]
    fn test_whole_file_garbage_is_empty_not_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("plugins.json");
        std::fs::write(&path, "not json at all").unwrap();

        let catalog = CustomCatalog::load_from(&path);
        assert!(catalog.entries.is_empty());
    }

    #[test]
    fn test_upsert_prepends_new_and_replaces_existing() {
        let temp = tempfile::tempdir().unwrap();
        let mut catalog = CustomCatalog::load_from(&temp.path().join("plugins.json"));

        catalog.upsert(CatalogEntry::new("a", PluginKind::Mcp));
        catalog.upsert(CatalogEntry::new("b", PluginKind::Mcp));
        assert_eq!(catalog.entries[0].key, "b");

        let mut replacement = CatalogEntry::new("a", PluginKind::Skill);
        replacement.name = Some("renamed".to_string());
        catalog.upsert(replacement);

        assert_eq!(catalog.entries.len(), 2);
        assert_eq!(catalog.get("a").unwrap().name.as_deref(), Some("renamed"));
    }

    #[test]
    fn test_remove() {
        let temp = tempfile::tempdir().unwrap();
        let mut catalog = CustomCatalog::load_from(&temp.path().join("plugins.json"));
        catalog.upsert(CatalogEntry::new("a", PluginKind::Mcp));

        assert!(catalog.remove("a").is_some());
        assert!(catalog.remove("a").is_none());
        assert!(catalog.entries.is_empty());
    }

    #[test]
    fn test_generate_key_shape() {
        let key = CustomCatalog::generate_key();
        assert!(key.starts_with("custom-"));
        assert!(key["custom-".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
