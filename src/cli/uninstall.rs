//! Remove an extension from a tool's configuration.
//!
//! Removing an MCP server that is not configured is a no-op, not an error.
//! Removing a skill deletes its directory from the shared scope.

use crate::catalog;
use crate::core::AxmError;
use crate::installer;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct UninstallCommand {
    /// Catalog key of the extension to remove.
    key: String,

    /// Target tool id or name. Defaults to the entry's recommended tool.
    #[arg(long)]
    tool: Option<String>,
}

impl UninstallCommand {
    pub async fn execute(self) -> Result<()> {
        let entry = catalog::find_entry(&self.key)?
            .ok_or_else(|| AxmError::EntryNotFound { key: self.key.clone() })?;

        installer::uninstall(&entry, self.tool.as_deref()).await?;
        println!("{} Removed '{}'", "✓".green(), entry.display_name().bold());
        Ok(())
    }
}
