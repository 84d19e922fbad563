//! The extension catalog: curated entries plus user-defined custom entries.
//!
//! The catalog is the source of what *can* be installed. It has two halves:
//!
//! - A **curated** list compiled into the binary ([`curated`]).
//! - A **custom** list the user maintains, persisted as JSON under
//!   `~/.axm/plugins.json` (see [`custom`]).
//!
//! [`merge`] combines the two into the view the CLI presents. A custom
//! entry whose key matches a curated one acts as a *patch*: its present
//! fields override the curated entry (letting users rename an entry or
//! point it at a fork) while the entry keeps its curated identity. Custom
//! entries with new keys are appended after the curated list.

pub mod custom;

pub use custom::CustomCatalog;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What kind of extension a catalog entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// An MCP server entry written into a tool's config file
    Mcp,
    /// A skill repository cloned into a skills directory
    Skill,
    /// A workflow definition (catalog-only for now; no installer)
    Workflow,
}

impl PluginKind {
    /// Lowercase label used in CLI output and `--kind` filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mcp => "mcp",
            Self::Skill => "skill",
            Self::Workflow => "workflow",
        }
    }
}

/// Explicit launch command for an MCP server entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServerSpec {
    /// Executable to spawn
    pub command: String,
    /// Arguments passed to the executable
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment variables for the spawned process
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// One installable extension in the catalog.
///
/// Serialized in camelCase to keep the custom catalog file compatible with
/// configs exported from earlier versions of this tool family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Stable key; doubles as the server key written into tool configs and
    /// the directory name for installed skills
    pub key: String,
    /// Extension kind
    #[serde(rename = "type")]
    pub kind: PluginKind,
    /// Display name; the key is shown when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short description for listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// GitHub `owner/repo` slug, when the extension lives on GitHub
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Install URL: a git clone URL for skills, or an `npx ...` command
    /// string for MCP servers without an explicit [`ServerSpec`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Documentation URL opened by `axm docs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
    /// Display name of the tool this entry installs into by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_tool: Option<String>,
    /// Explicit launch spec for MCP entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ServerSpec>,
    /// Whether the entry originates from the custom catalog
    #[serde(default, rename = "isCustom")]
    pub is_custom: bool,
}

impl CatalogEntry {
    /// Minimal entry with a key and kind; everything else unset.
    #[must_use]
    pub fn new(key: impl Into<String>, kind: PluginKind) -> Self {
        Self {
            key: key.into(),
            kind,
            name: None,
            desc: None,
            repo: None,
            url: None,
            docs_url: None,
            recommended_tool: None,
            spec: None,
            is_custom: false,
        }
    }

    /// The name to display: `name` when set, else the key.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    /// URL opened by `axm docs`: the explicit docs URL, else the GitHub
    /// repo page.
    #[must_use]
    pub fn docs_link(&self) -> Option<String> {
        self.docs_url
            .clone()
            .or_else(|| self.repo.as_ref().map(|r| format!("https://github.com/{r}")))
    }

    fn curated(
        key: &str,
        kind: PluginKind,
        name: &str,
        desc: &str,
        repo: &str,
        spec: Option<ServerSpec>,
        url: Option<&str>,
    ) -> Self {
        Self {
            key: key.to_string(),
            kind,
            name: Some(name.to_string()),
            desc: Some(desc.to_string()),
            repo: Some(repo.to_string()),
            url: url.map(ToString::to_string),
            docs_url: None,
            recommended_tool: Some("Claude".to_string()),
            spec,
            is_custom: false,
        }
    }
}

fn npx_spec(package: &str) -> Option<ServerSpec> {
    Some(ServerSpec {
        command: "npx".to_string(),
        args: vec!["-y".to_string(), package.to_string()],
        env: BTreeMap::new(),
    })
}

/// The curated catalog compiled into the binary.
#[must_use]
pub fn curated() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::curated(
            "composio",
            PluginKind::Mcp,
            "Composio",
            "Connect agents to hundreds of external apps and APIs",
            "ComposioHQ/composio",
            npx_spec("@composio/mcp-server"),
            None,
        ),
        CatalogEntry::curated(
            "mem",
            PluginKind::Mcp,
            "Claude Mem",
            "Persistent memory across agent sessions",
            "claudemem/claude-mem",
            npx_spec("@claudemem/mcp-server"),
            None,
        ),
        CatalogEntry::curated(
            "superpowers",
            PluginKind::Skill,
            "Superpowers",
            "A library of battle-tested agent skills",
            "superpowers/superpowers",
            None,
            Some("https://github.com/superpowers/superpowers.git"),
        ),
        CatalogEntry::curated(
            "localReview",
            PluginKind::Mcp,
            "Local Review",
            "Run code review passes locally before pushing",
            "agencyenterprise/local-review",
            npx_spec("@agencyenterprise/local-review-mcp"),
            None,
        ),
        CatalogEntry::curated(
            "plannotator",
            PluginKind::Mcp,
            "Plannotator",
            "Annotate and refine agent plans interactively",
            "m-onz/plannotator",
            npx_spec("plannotator-mcp"),
            None,
        ),
        CatalogEntry::curated(
            "ralphWiggum",
            PluginKind::Mcp,
            "Ralph Wiggum",
            "Loop an agent on a task until it is actually done",
            "jpsim/RalphWiggum",
            npx_spec("ralph-wiggum-mcp"),
            None,
        ),
        CatalogEntry::curated(
            "shipyard",
            PluginKind::Mcp,
            "Shipyard",
            "Preview environments for agent-built changes",
            "shipyard/shipyard",
            npx_spec("@shipyard/mcp-server"),
            None,
        ),
        CatalogEntry::curated(
            "devBrowser",
            PluginKind::Mcp,
            "Dev Browser",
            "Give agents a real browser for testing web apps",
            "dev-browser/dev-browser",
            npx_spec("@dev-browser/mcp-server"),
            None,
        ),
        CatalogEntry::curated(
            "lsp",
            PluginKind::Mcp,
            "LSP",
            "Language-server-backed code intelligence for agents",
            "sourcegraph/cody",
            npx_spec("@sourcegraph/mcp-server-lsp"),
            None,
        ),
        CatalogEntry::curated(
            "peerReview",
            PluginKind::Mcp,
            "Peer Review",
            "Have a second agent review the first agent's work",
            "agent-peer-review/agent-peer-review",
            npx_spec("agent-peer-review-mcp"),
            None,
        ),
    ]
}

/// Merge curated and custom entries into the presented catalog.
///
/// Pure function: curated entries come first in their original order, each
/// patched by a same-key custom entry if one exists (present custom fields
/// win, the entry stays non-custom). Custom entries with unmatched keys
/// follow in their stored order.
#[must_use]
pub fn merge(curated: &[CatalogEntry], custom: &[CatalogEntry]) -> Vec<CatalogEntry> {
    let mut merged: Vec<CatalogEntry> = curated
        .iter()
        .map(|entry| match custom.iter().find(|c| c.key == entry.key) {
            Some(patch) => apply_patch(entry, patch),
            None => entry.clone(),
        })
        .collect();

    merged.extend(
        custom.iter().filter(|c| !curated.iter().any(|entry| entry.key == c.key)).cloned(),
    );

    merged
}

/// Load the full catalog as presented to the user: curated entries merged
/// with the custom catalog from its default location.
pub fn load_merged() -> anyhow::Result<Vec<CatalogEntry>> {
    let custom = CustomCatalog::load()?;
    Ok(merge(&curated(), &custom.entries))
}

/// Look up an entry in the merged catalog by key.
pub fn find_entry(key: &str) -> anyhow::Result<Option<CatalogEntry>> {
    Ok(load_merged()?.into_iter().find(|e| e.key == key))
}

fn apply_patch(base: &CatalogEntry, patch: &CatalogEntry) -> CatalogEntry {
    CatalogEntry {
        key: base.key.clone(),
        kind: patch.kind,
        name: patch.name.clone().or_else(|| base.name.clone()),
        desc: patch.desc.clone().or_else(|| base.desc.clone()),
        repo: patch.repo.clone().or_else(|| base.repo.clone()),
        url: patch.url.clone().or_else(|| base.url.clone()),
        docs_url: patch.docs_url.clone().or_else(|| base.docs_url.clone()),
        recommended_tool: patch
            .recommended_tool
            .clone()
            .or_else(|| base.recommended_tool.clone()),
        spec: patch.spec.clone().or_else(|| base.spec.clone()),
        is_custom: false,
    }
}
