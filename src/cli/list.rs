//! List the extension catalog with installed state.
//!
//! Shows every catalog entry (curated plus custom), its kind, the tool it
//! is recommended for, and whether a scan of the tool configs found it
//! installed anywhere.
//!
//! # Examples
//!
//! ```bash
//! axm list
//! axm list --kind skill
//! axm list --installed
//! ```

use crate::catalog::{self, CatalogEntry, PluginKind};
use crate::scanner;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct ListCommand {
    /// Only show entries of this kind.
    #[arg(long, value_parser = parse_kind)]
    kind: Option<PluginKind>,

    /// Only show entries that are currently installed.
    #[arg(long)]
    installed: bool,
}

fn parse_kind(value: &str) -> Result<PluginKind, String> {
    match value.to_lowercase().as_str() {
        "mcp" => Ok(PluginKind::Mcp),
        "skill" => Ok(PluginKind::Skill),
        "workflow" => Ok(PluginKind::Workflow),
        other => Err(format!("unknown kind '{other}' (expected mcp, skill, or workflow)")),
    }
}

impl ListCommand {
    pub async fn execute(self) -> Result<()> {
        let entries = catalog::load_merged()?;
        let state = scanner::scan().await;

        let rows: Vec<&CatalogEntry> = entries
            .iter()
            .filter(|e| self.kind.is_none_or(|k| e.kind == k))
            .filter(|e| !self.installed || state.contains(e))
            .collect();

        if rows.is_empty() {
            println!("No matching extensions.");
            return Ok(());
        }

        println!(
            "{:<16} {:<10} {:<24} {:<12} {}",
            "KEY".bold(),
            "KIND".bold(),
            "NAME".bold(),
            "TOOL".bold(),
            "STATUS".bold()
        );

        for entry in rows {
            let status = if state.contains(entry) {
                "installed".green().to_string()
            } else {
                "-".dimmed().to_string()
            };
            let marker = if entry.is_custom { " (custom)".cyan().to_string() } else { String::new() };

            println!(
                "{:<16} {:<10} {:<24} {:<12} {}{}",
                entry.key,
                entry.kind.as_str(),
                entry.display_name(),
                entry.recommended_tool.as_deref().unwrap_or("-"),
                status,
                marker
            );
        }

        Ok(())
    }
}
