//! Manage custom catalog entries.
//!
//! Custom entries are persisted in `~/.axm/plugins.json` and merged into
//! the catalog every time it is loaded. Adding an entry whose key matches a
//! curated one patches that entry instead of shadowing it.
//!
//! # Examples
//!
//! ```bash
//! axm plugin add my-server --url "npx -y my-mcp-server" --name "My Server"
//! axm plugin add --url "npx -y other-server"     # Key is generated
//! axm plugin edit my-server --desc "Does things"
//! axm plugin remove my-server
//! ```

use crate::catalog::{CatalogEntry, CustomCatalog, PluginKind};
use crate::core::AxmError;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Args)]
pub struct PluginCommand {
    #[command(subcommand)]
    command: PluginSubcommand,
}

/// Fields shared by `add` and `edit`.
#[derive(Args)]
struct EntryFields {
    /// Display name.
    #[arg(long)]
    name: Option<String>,

    /// One-line description.
    #[arg(long)]
    desc: Option<String>,

    /// GitHub repository in `owner/repo` form.
    #[arg(long)]
    repo: Option<String>,

    /// Install url: an `npx ...` command line, a binary path, or for
    /// skills a git clone url.
    #[arg(long)]
    url: Option<String>,

    /// Documentation url. Defaults to the GitHub page of `--repo`.
    #[arg(long)]
    docs_url: Option<String>,

    /// Recommended tool for this entry.
    #[arg(long)]
    tool: Option<String>,
}

impl EntryFields {
    fn apply(self, entry: &mut CatalogEntry) {
        if self.name.is_some() {
            entry.name = self.name;
        }
        if self.desc.is_some() {
            entry.desc = self.desc;
        }
        if self.repo.is_some() {
            entry.repo = self.repo;
        }
        if self.url.is_some() {
            entry.url = self.url;
        }
        if self.docs_url.is_some() {
            entry.docs_url = self.docs_url;
        }
        if self.tool.is_some() {
            entry.recommended_tool = self.tool;
        }
    }
}

#[derive(Subcommand)]
enum PluginSubcommand {
    /// Add a custom entry to the catalog.
    Add {
        /// Entry key. Generated (`custom-<timestamp>`) when omitted.
        key: Option<String>,

        /// Kind of extension.
        #[arg(long, default_value = "mcp", value_parser = parse_kind)]
        kind: PluginKind,

        #[command(flatten)]
        fields: EntryFields,
    },

    /// Edit an existing custom entry.
    Edit {
        /// Key of the entry to edit.
        key: String,

        #[command(flatten)]
        fields: EntryFields,
    },

    /// Remove a custom entry from the catalog.
    Remove {
        /// Key of the entry to remove.
        key: String,
    },
}

fn parse_kind(value: &str) -> Result<PluginKind, String> {
    match value.to_lowercase().as_str() {
        "mcp" => Ok(PluginKind::Mcp),
        "skill" => Ok(PluginKind::Skill),
        "workflow" => Ok(PluginKind::Workflow),
        other => Err(format!("unknown kind '{other}' (expected mcp, skill, or workflow)")),
    }
}

impl PluginCommand {
    pub async fn execute(self) -> Result<()> {
        let mut catalog = CustomCatalog::load()?;

        match self.command {
            PluginSubcommand::Add { key, kind, fields } => {
                let key = key.unwrap_or_else(CustomCatalog::generate_key);
                let mut entry = CatalogEntry::new(key.clone(), kind);
                entry.is_custom = true;
                fields.apply(&mut entry);

                catalog.upsert(entry);
                catalog.save()?;
                println!("{} Added plugin '{}'", "✓".green(), key.bold());
            }
            PluginSubcommand::Edit { key, fields } => {
                let mut entry = catalog
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| AxmError::EntryNotFound { key: key.clone() })?;
                fields.apply(&mut entry);

                catalog.upsert(entry);
                catalog.save()?;
                println!("{} Updated plugin '{}'", "✓".green(), key.bold());
            }
            PluginSubcommand::Remove { key } => {
                catalog
                    .remove(&key)
                    .ok_or_else(|| AxmError::EntryNotFound { key: key.clone() })?;
                catalog.save()?;
                println!("{} Removed plugin '{}'", "✓".green(), key.bold());
            }
        }

        Ok(())
    }
}
