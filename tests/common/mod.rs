//! Shared harness for integration tests.
//!
//! Each test gets an isolated fake home directory so tool configs, the
//! custom plugin store, and skill directories never touch the real ones.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Output of one axm invocation.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// An isolated environment with its own home directory.
pub struct TestEnv {
    _home: TempDir,
    home_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        let home = TempDir::new().context("failed to create temp home")?;
        let home_path = home.path().to_path_buf();
        Ok(Self { _home: home, home_path })
    }

    pub fn home(&self) -> &Path {
        &self.home_path
    }

    /// Path of a tool config file inside the fake home.
    pub fn config_path(&self, relative: &str) -> PathBuf {
        self.home_path.join(relative)
    }

    /// Write a tool config file inside the fake home.
    pub fn write_config(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.config_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(())
    }

    pub fn read_config(&self, relative: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.config_path(relative))?)
    }

    /// Run the axm binary against this environment.
    pub fn run_axm(&self, args: &[&str]) -> Result<CommandOutput> {
        let binary = env!("CARGO_BIN_EXE_axm");
        let output = Command::new(binary)
            .args(args)
            .env("HOME", &self.home_path)
            .env("USERPROFILE", &self.home_path)
            .env("AXM_PLUGINS_PATH", self.home_path.join(".axm").join("plugins.json"))
            .env("AXM_NO_PROGRESS", "1")
            .env("NO_COLOR", "1")
            .output()
            .context("failed to run axm")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}
