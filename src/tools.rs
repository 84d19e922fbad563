//! Registry of the AI coding tools AXM manages.
//!
//! Each supported tool is described by a [`ToolDescriptor`]: where its
//! config file lives, which serialization dialect that file uses, and which
//! schema variant its MCP server entries follow. The set of tools is closed
//! and lives in a static table; adding a tool means adding a row, not
//! implementing a trait.
//!
//! # Schema variance
//!
//! The tools agree on almost nothing:
//! - Most store servers under a `mcpServers` object with
//!   `{command, args, env}` entries.
//! - OpenCode and Qoder use a `mcp` key instead; OpenCode additionally uses
//!   `{type: "local", command: [exe, ...args], environment: {}}` entries.
//! - Codex uses TOML with a `mcp_servers` table.
//!
//! The variance is captured by [`ServerSchema`] and consumed by
//! [`crate::schema`], which translates every shape to and from the
//! canonical record.

use crate::dialect::ConfigDialect;
use std::path::PathBuf;

/// How a tool's config file lays out its MCP server entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerSchema {
    /// `mcpServers` object with `{command, args, env}` entries.
    Standard,
    /// `mcp` object with `{command, args, env}` entries (Qoder).
    McpKey,
    /// `mcp` object with `{type: "local", command: [..], environment: {}}`
    /// entries (OpenCode).
    LocalCommandArray,
    /// `mcp_servers` TOML table with `{command, args, env}` entries (Codex).
    TomlTable,
}

impl ServerSchema {
    /// The top-level key under which server entries are stored.
    #[must_use]
    pub const fn container_key(self) -> &'static str {
        match self {
            Self::Standard => "mcpServers",
            Self::McpKey | Self::LocalCommandArray => "mcp",
            Self::TomlTable => "mcp_servers",
        }
    }
}

/// A supported AI coding tool and the shape of its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Stable identifier used on the command line (`--tool claude`)
    pub id: &'static str,
    /// Human-facing display name
    pub display_name: &'static str,
    /// Config file location, `~/`-relative
    pub config_path: &'static str,
    /// Serialization dialect of the config file
    pub dialect: ConfigDialect,
    /// Layout of MCP server entries within the config
    pub schema: ServerSchema,
    /// Skills directory for this tool's scope, `~/`-relative
    pub skills_path: &'static str,
}

impl ToolDescriptor {
    /// Resolve the tool's config path against the current home directory.
    pub fn config_file(&self) -> anyhow::Result<PathBuf> {
        crate::utils::platform::resolve_path(self.config_path)
    }

    /// Resolve the tool's skills directory against the current home directory.
    pub fn skills_dir(&self) -> anyhow::Result<PathBuf> {
        crate::utils::platform::resolve_path(self.skills_path)
    }
}

/// The closed set of supported tools.
pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: "claude",
        display_name: "Claude",
        config_path: "~/.claude.json",
        dialect: ConfigDialect::Json,
        schema: ServerSchema::Standard,
        skills_path: "~/.claude/skills",
    },
    ToolDescriptor {
        id: "gemini",
        display_name: "Gemini",
        config_path: "~/.gemini/settings.json",
        dialect: ConfigDialect::Json,
        schema: ServerSchema::Standard,
        skills_path: "~/.gemini/skills",
    },
    ToolDescriptor {
        id: "opencode",
        display_name: "OpenCode",
        config_path: "~/.config/opencode/opencode.json",
        dialect: ConfigDialect::Json,
        schema: ServerSchema::LocalCommandArray,
        skills_path: "~/.config/opencode/skills",
    },
    ToolDescriptor {
        id: "qoder",
        display_name: "Qoder",
        config_path: "~/.qoder.json",
        dialect: ConfigDialect::Json,
        schema: ServerSchema::McpKey,
        skills_path: "~/.qoder/skills",
    },
    ToolDescriptor {
        id: "codebuddy",
        display_name: "CodeBuddy",
        config_path: "~/.codebuddy/settings.json",
        dialect: ConfigDialect::Json,
        schema: ServerSchema::Standard,
        skills_path: "~/.codebuddy/skills",
    },
    ToolDescriptor {
        id: "copilot",
        display_name: "Copilot",
        config_path: "~/.copilot/config.json",
        dialect: ConfigDialect::Json,
        schema: ServerSchema::Standard,
        skills_path: "~/.copilot/skills",
    },
    ToolDescriptor {
        id: "codex",
        display_name: "Codex",
        config_path: "~/.codex/config.toml",
        dialect: ConfigDialect::Toml,
        schema: ServerSchema::TomlTable,
        skills_path: "~/.codex/skills",
    },
];

/// Skills directory shared by all tools that read the `agents` scope.
pub const SHARED_SKILLS_PATH: &str = "~/.agents/skills";

/// Look up a tool descriptor by id (case-insensitive).
///
/// Returns `None` for unknown ids; callers map that to
/// [`crate::core::AxmError::ToolNotFound`].
#[must_use]
pub fn find_tool(id: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

/// Look up a tool by its display name (case-insensitive).
///
/// Catalog entries name their recommended tool by display name
/// ("Claude"), not by id.
#[must_use]
pub fn find_tool_by_display_name(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.display_name.eq_ignore_ascii_case(name))
}
