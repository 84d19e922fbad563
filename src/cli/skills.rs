//! Manage installed skill directories.
//!
//! Skills live as plain directories under a scope root. The shared
//! `agents` scope (`~/.agents/skills`) is the default; each tool also has
//! its own scope for skills it manages itself.
//!
//! # Examples
//!
//! ```bash
//! axm skills list
//! axm skills list --scope claude
//! axm skills install https://github.com/obra/superpowers.git
//! axm skills remove superpowers
//! ```

use crate::core::AxmError;
use crate::skills;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Args)]
pub struct SkillsCommand {
    #[command(subcommand)]
    command: SkillsSubcommand,
}

#[derive(Subcommand)]
enum SkillsSubcommand {
    /// List skills installed in a scope.
    List {
        /// Scope to list: `agents` (shared) or a tool id.
        #[arg(long, default_value = "agents")]
        scope: String,
    },

    /// Clone a skill repository directly from a git url.
    Install {
        /// Git clone url of the skill repository.
        url: String,

        /// Scope to install into: `agents` (shared) or a tool id.
        #[arg(long, default_value = "agents")]
        scope: String,
    },

    /// Delete a skill directory from a scope.
    Remove {
        /// Skill directory name.
        name: String,

        /// Scope to remove from: `agents` (shared) or a tool id.
        #[arg(long, default_value = "agents")]
        scope: String,
    },
}

impl SkillsCommand {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            SkillsSubcommand::List { scope } => {
                let root = skills::scope_dir(&scope)?;
                let installed = skills::list_skills(&root)?;

                if installed.is_empty() {
                    println!("No skills installed in {}", root.display());
                    return Ok(());
                }

                for skill in installed {
                    let meta = skills::resolve_metadata(&skill.path);
                    let mut extras = Vec::new();
                    if let Some(version) = &meta.version {
                        extras.push(format!("v{version}"));
                    }
                    if let Some(author) = &meta.author {
                        extras.push(format!("by {author}"));
                    }
                    let suffix = if extras.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", extras.join(", "))
                    };
                    println!("{}{}", skill.name.bold(), suffix.dimmed());
                    println!("  {}", meta.description);
                }
                Ok(())
            }
            SkillsSubcommand::Install { url, scope } => {
                let root = skills::scope_dir(&scope)?;
                let name = skills::folder_name_from_url(&url);
                let path = skills::install_skill(&url, &name, &root).await?;
                println!("{} Installed skill '{}' to {}", "✓".green(), name.bold(), path.display());
                Ok(())
            }
            SkillsSubcommand::Remove { name, scope } => {
                let root = skills::scope_dir(&scope)?;
                let target = skills::list_skills(&root)?
                    .into_iter()
                    .find(|s| s.name == name)
                    .ok_or(AxmError::SkillNotFound { name })?;

                skills::remove_skill(&target)?;
                println!("{} Removed skill '{}'", "✓".green(), target.name.bold());
                Ok(())
            }
        }
    }
}
