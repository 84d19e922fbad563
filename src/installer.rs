//! The mutation engine: installing and uninstalling catalog entries.
//!
//! All edits to tool configs follow the same transaction shape: load the
//! file (absent means empty), edit the parsed tree through
//! [`crate::schema`], serialize, and write atomically. The file is never
//! truncated in place, and a file that fails to parse is never rewritten.
//!
//! # Concurrent edits
//!
//! Config files are shared with the tools themselves and with editors.
//! Between load and write the engine re-hashes the file and logs a warning
//! when it changed underneath us; the write still proceeds (last writer
//! wins) because retrying against a live editor would just race again.
//!
//! # Idempotence
//!
//! Uninstalling an MCP server that is not configured, or whose tool config
//! file does not exist, succeeds without touching the file. Skill removal
//! is stricter and reports [`AxmError::SkillNotFound`], since deleting a
//! directory the user named has to mean something happened.

use crate::catalog::{CatalogEntry, PluginKind};
use crate::core::AxmError;
use crate::dialect::{self, ConfigTree};
use crate::schema::{ServerRecord, inject_server, remove_server};
use crate::skills;
use crate::tools::{ToolDescriptor, find_tool, find_tool_by_display_name};
use crate::utils::fs::{atomic_write, content_digest};
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// Resolve which tool a mutation targets.
///
/// An explicit `--tool` flag wins (accepted as id or display name), then
/// the entry's recommended tool, then Claude.
pub fn target_tool(
    entry: &CatalogEntry,
    tool_flag: Option<&str>,
) -> Result<&'static ToolDescriptor> {
    let requested = tool_flag.or(entry.recommended_tool.as_deref()).unwrap_or("claude");

    find_tool(requested)
        .or_else(|| find_tool_by_display_name(requested))
        .ok_or_else(|| AxmError::ToolNotFound { name: requested.to_string() }.into())
}

/// Derive the launch record for an MCP catalog entry.
///
/// Prefers the explicit spec. Without one, a `url` that starts with `npx`
/// is treated as a command line and split on whitespace; any other url is
/// used as the bare command.
pub fn derive_server_record(entry: &CatalogEntry) -> Result<ServerRecord> {
    if let Some(spec) = &entry.spec {
        return Ok(ServerRecord {
            command: spec.command.clone(),
            args: spec.args.clone(),
            env: spec.env.clone(),
        });
    }

    if let Some(url) = entry.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        if url.starts_with("npx") {
            let mut parts = url.split_whitespace().map(ToString::to_string);
            let command = parts.next().unwrap_or_else(|| "npx".to_string());
            return Ok(ServerRecord::new(command, parts.collect()));
        }
        return Ok(ServerRecord::new(url, Vec::new()));
    }

    Err(AxmError::Other {
        message: format!("catalog entry '{}' has no command spec or url to install", entry.key),
    }
    .into())
}

/// Install an MCP server entry into the config file at `config_path`.
///
/// Exposed with an explicit path so tests can run against temp files; the
/// [`install`] wrapper resolves the tool's real config location.
pub async fn install_mcp_server(
    entry: &CatalogEntry,
    tool: &ToolDescriptor,
    config_path: &Path,
) -> Result<()> {
    let record = derive_server_record(entry)?;

    let original = read_optional(config_path)?;
    let mut tree = match &original {
        Some(content) => dialect::parse(content, tool.dialect, config_path)?,
        None => ConfigTree::empty(tool.dialect),
    };

    inject_server(&mut tree, tool.schema, &entry.key, &record);
    write_config(config_path, &tree, original.as_deref())?;

    info!(key = %entry.key, tool = tool.id, "installed MCP server");
    Ok(())
}

/// Remove an MCP server entry from the config file at `config_path`.
///
/// Returns whether the entry was present. Absent file or key is success.
pub async fn uninstall_mcp_server(
    key: &str,
    tool: &ToolDescriptor,
    config_path: &Path,
) -> Result<bool> {
    let Some(original) = read_optional(config_path)? else {
        return Ok(false);
    };

    let mut tree = dialect::parse(&original, tool.dialect, config_path)?;
    if !remove_server(&mut tree, tool.schema, key) {
        return Ok(false);
    }

    write_config(config_path, &tree, Some(&original))?;
    info!(key, tool = tool.id, "removed MCP server");
    Ok(true)
}

/// Install a catalog entry: an MCP server into the target tool's config,
/// or a skill cloned into the shared scope.
pub async fn install(entry: &CatalogEntry, tool_flag: Option<&str>) -> Result<()> {
    match entry.kind {
        PluginKind::Mcp => {
            let tool = target_tool(entry, tool_flag)?;
            let config_path = tool.config_file()?;
            install_mcp_server(entry, tool, &config_path).await
        }
        PluginKind::Skill => {
            let url = entry
                .url
                .clone()
                .or_else(|| entry.repo.as_ref().map(|r| format!("https://github.com/{r}.git")))
                .ok_or_else(|| AxmError::Other {
                    message: format!("skill '{}' has no url or repo to clone", entry.key),
                })?;

            let root = skills::scope_dir("agents")?;
            skills::install_skill(&url, &entry.key, &root).await?;
            Ok(())
        }
        PluginKind::Workflow => Err(AxmError::Other {
            message: format!("'{}' is a workflow entry; workflows have no installer yet", entry.key),
        }
        .into()),
    }
}

/// Uninstall a catalog entry from the target tool (MCP) or the shared
/// skills scope (skill).
pub async fn uninstall(entry: &CatalogEntry, tool_flag: Option<&str>) -> Result<()> {
    match entry.kind {
        PluginKind::Mcp => {
            let tool = target_tool(entry, tool_flag)?;
            let config_path = tool.config_file()?;
            let removed = uninstall_mcp_server(&entry.key, tool, &config_path).await?;
            if !removed {
                info!(key = %entry.key, tool = tool.id, "server was not configured; nothing to do");
            }
            Ok(())
        }
        PluginKind::Skill => {
            let root = skills::scope_dir("agents")?;
            let installed = skills::list_skills(&root)?;
            let target = installed
                .into_iter()
                .find(|s| s.name == entry.key)
                .ok_or_else(|| AxmError::SkillNotFound { name: entry.key.clone() })?;
            skills::remove_skill(&target)
        }
        PluginKind::Workflow => Err(AxmError::Other {
            message: format!("'{}' is a workflow entry; workflows have no installer yet", entry.key),
        }
        .into()),
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(std::fs::read_to_string(path)?))
}

/// Serialize and atomically write a config tree, warning if the file
/// changed since it was loaded.
fn write_config(path: &Path, tree: &ConfigTree, loaded_content: Option<&str>) -> Result<()> {
    if let Some(loaded) = loaded_content
        && let Ok(current) = std::fs::read(path)
        && content_digest(current.as_slice()) != content_digest(loaded.as_bytes())
    {
        warn!(path = %path.display(), "config changed during edit; overwriting with merged result");
    }

    let serialized = dialect::serialize(tree);
    atomic_write(path, serialized.as_bytes()).map_err(|e| {
        AxmError::WriteFailed { path: path.display().to_string(), reason: e.to_string() }.into()
    })
}
