//! Per-tool configuration overview.
//!
//! For each supported tool: where its config file lives, whether it exists,
//! and which MCP servers it declares. Skill directories are listed for the
//! shared scope. Unreadable configs are reported, never fatal.

use crate::core::AxmError;
use crate::dialect;
use crate::schema::extract_servers;
use crate::skills;
use crate::tools::{TOOLS, find_tool};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct StatusCommand {
    /// Only show one tool's configuration.
    #[arg(long)]
    tool: Option<String>,
}

impl StatusCommand {
    pub async fn execute(self) -> Result<()> {
        let selected = match self.tool.as_deref() {
            Some(id) => Some(
                find_tool(id).ok_or_else(|| AxmError::ToolNotFound { name: id.to_string() })?,
            ),
            None => None,
        };

        for tool in TOOLS {
            if let Some(selected) = selected
                && selected.id != tool.id
            {
                continue;
            }
            let path = tool.config_file()?;
            println!("{} ({})", tool.display_name.bold(), path.display());

            if !path.exists() {
                println!("  {}", "no config file".dimmed());
                continue;
            }

            match dialect::load(&path, tool.dialect) {
                Ok(tree) => {
                    let servers = extract_servers(&tree, tool.schema);
                    if servers.is_empty() {
                        println!("  {}", "no MCP servers configured".dimmed());
                    }
                    for (key, record) in servers {
                        let mut line = record.command.clone();
                        if !record.args.is_empty() {
                            line.push(' ');
                            line.push_str(&record.args.join(" "));
                        }
                        println!("  {} {}", key.green(), line.dimmed());
                    }
                }
                Err(e) => println!("  {} {}", "unreadable:".red(), e),
            }
        }

        if selected.is_none() {
            let skills_root = skills::scope_dir("agents")?;
            println!("{} ({})", "Skills".bold(), skills_root.display());
            let installed = skills::list_skills(&skills_root)?;
            if installed.is_empty() {
                println!("  {}", "no skills installed".dimmed());
            }
            for skill in installed {
                let meta = skills::resolve_metadata(&skill.path);
                println!("  {} {}", skill.name.green(), meta.description.dimmed());
            }
        }

        Ok(())
    }
}
