//! Install an extension from the catalog.
//!
//! MCP entries are written into the target tool's config file; skills are
//! cloned into the shared skills directory. After the mutation the command
//! rescans and confirms what the tools will actually see.
//!
//! # Examples
//!
//! ```bash
//! axm install mem                # Into the recommended tool
//! axm install mem --tool codex   # Into a specific tool
//! ```

use crate::catalog;
use crate::core::AxmError;
use crate::installer;
use crate::scanner;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct InstallCommand {
    /// Catalog key of the extension to install.
    key: String,

    /// Target tool id or name. Defaults to the entry's recommended tool.
    #[arg(long)]
    tool: Option<String>,
}

impl InstallCommand {
    pub async fn execute(self) -> Result<()> {
        let entry = catalog::find_entry(&self.key)?
            .ok_or_else(|| AxmError::EntryNotFound { key: self.key.clone() })?;

        installer::install(&entry, self.tool.as_deref()).await?;

        let state = scanner::scan().await;
        if state.contains(&entry) {
            println!("{} Installed '{}'", "✓".green(), entry.display_name().bold());
        } else {
            // The write succeeded but the scan disagrees, which points at an
            // overlapping edit from another process.
            println!(
                "{} Installed '{}', but a rescan does not show it yet",
                "!".yellow(),
                entry.display_name()
            );
        }

        Ok(())
    }
}
