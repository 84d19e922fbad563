//! Open an extension's documentation page in the browser.

use crate::catalog;
use crate::core::AxmError;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct DocsCommand {
    /// Catalog key of the extension.
    key: String,

    /// Print the url instead of opening a browser.
    #[arg(long)]
    print: bool,
}

impl DocsCommand {
    pub fn execute(self) -> Result<()> {
        let entry = catalog::find_entry(&self.key)?
            .ok_or_else(|| AxmError::EntryNotFound { key: self.key.clone() })?;

        let url = entry.docs_link().ok_or_else(|| AxmError::Other {
            message: format!("'{}' has no documentation url or repository", entry.key),
        })?;

        if self.print {
            println!("{url}");
            return Ok(());
        }

        opener::open(&url).with_context(|| format!("failed to open {url}"))?;
        Ok(())
    }
}
