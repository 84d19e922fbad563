//! Command-line interface for axm.
//!
//! Each subcommand lives in its own module with its own argument struct and
//! an async `execute` method. Global flags (`--verbose`, `--quiet`) control
//! logging for every subcommand.
//!
//! # Commands
//!
//! - `list` - Show the catalog with installed state
//! - `install` / `uninstall` - Add or remove an extension for a tool
//! - `status` - Per-tool configuration overview
//! - `skills` - Manage installed skill directories
//! - `inspect` - Probe an MCP server for its capabilities
//! - `plugin` - Manage custom catalog entries
//! - `docs` - Open an extension's documentation in the browser
//!
//! # Examples
//!
//! ```bash
//! axm list --kind mcp
//! axm install mem --tool codex
//! axm inspect composio
//! axm plugin add my-server --url "npx -y my-server"
//! ```

mod docs;
mod inspect;
mod install;
mod list;
mod plugin;
mod skills;
mod status;
mod uninstall;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Top-level CLI parser.
#[derive(Parser)]
#[command(
    name = "axm",
    about = "Agent extension manager - MCP servers and skills for coding agents",
    version,
    long_about = "axm manages extensions (MCP servers and skills) across the config \
                  files of coding agent CLIs such as Claude, Codex, and Gemini."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output.
    ///
    /// Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress everything except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the extension catalog with installed state.
    List(list::ListCommand),

    /// Install an extension into a tool's configuration.
    Install(install::InstallCommand),

    /// Remove an extension from a tool's configuration.
    Uninstall(uninstall::UninstallCommand),

    /// Show each tool's config file and what is installed in it.
    Status(status::StatusCommand),

    /// Manage installed skill directories.
    Skills(skills::SkillsCommand),

    /// Launch an MCP server and list the tools it exposes.
    Inspect(inspect::InspectCommand),

    /// Manage custom catalog entries.
    Plugin(plugin::PluginCommand),

    /// Open an extension's documentation page.
    Docs(docs::DocsCommand),
}

impl Cli {
    /// Initialize logging and dispatch to the selected subcommand.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::List(cmd) => cmd.execute().await,
            Commands::Install(cmd) => cmd.execute().await,
            Commands::Uninstall(cmd) => cmd.execute().await,
            Commands::Status(cmd) => cmd.execute().await,
            Commands::Skills(cmd) => cmd.execute().await,
            Commands::Inspect(cmd) => cmd.execute().await,
            Commands::Plugin(cmd) => cmd.execute().await,
            Commands::Docs(cmd) => cmd.execute(),
        }
    }

    /// Set up the tracing subscriber. `RUST_LOG` wins over the flags.
    fn init_logging(&self) {
        let default = if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from(["axm", "--verbose", "list"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["axm", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn test_all_subcommands_parse() {
        for args in [
            vec!["axm", "list"],
            vec!["axm", "list", "--kind", "mcp"],
            vec!["axm", "install", "mem"],
            vec!["axm", "install", "mem", "--tool", "codex"],
            vec!["axm", "uninstall", "mem"],
            vec!["axm", "status"],
            vec!["axm", "status", "--tool", "claude"],
            vec!["axm", "inspect", "composio", "--tool", "claude"],
            vec!["axm", "skills", "list"],
            vec!["axm", "skills", "install", "https://github.com/obra/superpowers.git"],
            vec!["axm", "skills", "remove", "superpowers"],
            vec!["axm", "inspect", "composio"],
            vec!["axm", "plugin", "add", "my-server", "--url", "npx -y x"],
            vec!["axm", "plugin", "remove", "custom-1"],
            vec!["axm", "docs", "composio"],
        ] {
            assert!(Cli::try_parse_from(args.iter().copied()).is_ok(), "failed to parse {args:?}");
        }
    }
}
