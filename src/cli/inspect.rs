//! Probe an MCP server and print the tools it exposes.
//!
//! Launches the server exactly as a tool would (same command, args, and
//! environment), runs the initialize handshake, and lists its declared
//! tools. Useful for checking what an extension actually does before
//! installing it, or for debugging a server that a tool refuses to load.
//!
//! # Examples
//!
//! ```bash
//! axm inspect composio
//! axm inspect mem --tool codex    # As configured for Codex
//! ```

use crate::catalog;
use crate::core::AxmError;
use crate::dialect;
use crate::installer::derive_server_record;
use crate::probe;
use crate::schema::{ServerRecord, extract_servers};
use crate::tools::find_tool;
use crate::utils::progress::Spinner;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct InspectCommand {
    /// Catalog key of the MCP server to probe.
    key: String,

    /// Probe the server exactly as configured in this tool's config file,
    /// instead of as the catalog describes it.
    #[arg(long)]
    tool: Option<String>,
}

impl InspectCommand {
    /// Resolve the launch record: from a tool's config when `--tool` is
    /// given, else from the catalog entry.
    fn resolve_record(&self, entry: &catalog::CatalogEntry) -> Result<ServerRecord> {
        let Some(tool_id) = self.tool.as_deref() else {
            return derive_server_record(entry);
        };

        let tool = find_tool(tool_id)
            .ok_or_else(|| AxmError::ToolNotFound { name: tool_id.to_string() })?;
        let path = tool.config_file()?;
        let tree = dialect::load(&path, tool.dialect)?;

        extract_servers(&tree, tool.schema)
            .into_iter()
            .find(|(key, _)| key == &self.key)
            .map(|(_, record)| record)
            .ok_or_else(|| {
                AxmError::Other {
                    message: format!("'{}' is not configured for {}", self.key, tool.display_name),
                }
                .into()
            })
    }

    pub async fn execute(self) -> Result<()> {
        let entry = catalog::find_entry(&self.key)?
            .ok_or_else(|| AxmError::EntryNotFound { key: self.key.clone() })?;

        let record = self.resolve_record(&entry)?;

        let spinner = Spinner::new();
        spinner.set_message(format!("Probing '{}'...", entry.display_name()));
        let result = probe::probe_server(&entry.key, &record).await;
        spinner.finish_and_clear();

        let report = result?;

        println!("{}", entry.display_name().bold());
        if let Some(name) = &report.server_name {
            let version = report.server_version.as_deref().unwrap_or("?");
            println!("  server: {name} {version}");
        }
        if let Some(protocol) = &report.protocol_version {
            println!("  protocol: {protocol}");
        }

        if report.tools.is_empty() {
            println!("  {}", "no tools declared".dimmed());
            return Ok(());
        }

        println!("  tools:");
        for tool in &report.tools {
            match &tool.description {
                Some(desc) => println!("    {} {}", tool.name.green(), desc.dimmed()),
                None => println!("    {}", tool.name.green()),
            }
        }

        Ok(())
    }
}
