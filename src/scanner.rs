//! Best-effort scan of what is currently installed across all tools.
//!
//! The scan is pull-based: nothing is cached, every consumer rescans when
//! it needs fresh state, and CLI commands rescan right after a mutation.
//! The scan as a whole never fails. Each tool is read independently and a
//! tool whose config is unreadable or malformed simply contributes nothing
//! (with a warning), so one broken config cannot hide the state of the
//! other six tools.

use crate::catalog::{CatalogEntry, PluginKind};
use crate::dialect;
use crate::schema::extract_servers;
use crate::skills;
use crate::tools::{TOOLS, ToolDescriptor};
use futures::future::join_all;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// The union of installed extension keys across every tool plus the shared
/// skills scope.
#[derive(Debug, Clone, Default)]
pub struct InstalledState {
    /// Installed server keys and skill directory names
    pub keys: HashSet<String>,
}

impl InstalledState {
    /// Whether a catalog entry is currently installed anywhere.
    ///
    /// Matches on the entry key. For skill entries backed by a GitHub repo,
    /// the repo's last path segment also counts: a skill cloned before being
    /// added to the catalog shows up under its repository name. The fallback
    /// is skill-only so an MCP entry is never reported installed just
    /// because a skill directory shares its repo name.
    #[must_use]
    pub fn contains(&self, entry: &CatalogEntry) -> bool {
        if self.keys.contains(&entry.key) {
            return true;
        }
        if entry.kind != PluginKind::Skill {
            return false;
        }
        entry
            .repo
            .as_deref()
            .and_then(|repo| repo.split('/').next_back())
            .is_some_and(|last| self.keys.contains(last))
    }
}

/// Extract the server keys configured in one tool's config file.
///
/// Exposed separately from [`scan`] so tests and the `status` command can
/// point it at explicit paths.
pub fn scan_config_file(path: &Path, tool: &ToolDescriptor) -> anyhow::Result<Vec<String>> {
    let tree = dialect::load(path, tool.dialect)?;
    Ok(extract_servers(&tree, tool.schema).into_iter().map(|(key, _)| key).collect())
}

/// Scan every tool's config plus the shared skills scope.
///
/// Never fails; per-tool problems are logged and skipped.
pub async fn scan() -> InstalledState {
    let mut state = InstalledState::default();

    // Skills in the shared scope count as installed for every tool
    match skills::scope_dir("agents").and_then(|dir| skills::list_skills(&dir)) {
        Ok(installed) => {
            for skill in installed {
                state.keys.insert(skill.name);
            }
        }
        Err(e) => warn!(error = %e, "skipping skills scan"),
    }

    let scans = TOOLS.iter().map(|tool| async move {
        let path = match tool.config_file() {
            Ok(path) => path,
            Err(e) => {
                warn!(tool = tool.id, error = %e, "cannot resolve config path");
                return Vec::new();
            }
        };

        match scan_config_file(&path, tool) {
            Ok(keys) => {
                debug!(tool = tool.id, servers = keys.len(), "scanned");
                keys
            }
            Err(e) => {
                warn!(tool = tool.id, error = %e, "skipping unreadable config");
                Vec::new()
            }
        }
    });

    for keys in join_all(scans).await {
        state.keys.extend(keys);
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, PluginKind};
    use crate::tools::find_tool;

    #[test]
    fn test_scan_config_file_reads_keys() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("claude.json");
        std::fs::write(
            &path,
            r#"{"mcpServers": {"mem": {"command": "npx"}, "lsp": {"command": "npx"}}}"#,
        )
        .unwrap();

        let mut keys = scan_config_file(&path, find_tool("claude").unwrap()).unwrap();
        keys.sort();
        assert_eq!(keys, vec!["lsp", "mem"]);
    }

    #[test]
    fn test_scan_config_file_absent_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let keys =
            scan_config_file(&temp.path().join("none.json"), find_tool("claude").unwrap()).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_scan_config_file_malformed_is_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("claude.json");
        std::fs::write(&path, "{ broken").unwrap();

        assert!(scan_config_file(&path, find_tool("claude").unwrap()).is_err());
    }

    #[test]
    fn test_contains_matches_key_and_repo_fallback() {
        let mut state = InstalledState::default();
        state.keys.insert("mem".to_string());
        state.keys.insert("superpowers".to_string());

        let mut by_key = CatalogEntry::new("mem", PluginKind::Mcp);
        by_key.repo = Some("claudemem/claude-mem".to_string());
        assert!(state.contains(&by_key));

        // Installed under the repo name rather than the catalog key
        let mut by_repo = CatalogEntry::new("powers", PluginKind::Skill);
        by_repo.repo = Some("obra/superpowers".to_string());
        assert!(state.contains(&by_repo));

        let absent = CatalogEntry::new("composio", PluginKind::Mcp);
        assert!(!state.contains(&absent));
    }

    #[test]
    fn test_repo_fallback_is_skill_only() {
        let mut state = InstalledState::default();
        state.keys.insert("superpowers".to_string());

        // An MCP server is not installed just because a skill directory
        // matches its repo tail.
        let mut server = CatalogEntry::new("powersServer", PluginKind::Mcp);
        server.repo = Some("obra/superpowers".to_string());
        assert!(!state.contains(&server));

        let mut skill = CatalogEntry::new("powers", PluginKind::Skill);
        skill.repo = Some("obra/superpowers".to_string());
        assert!(state.contains(&skill));
    }
}
