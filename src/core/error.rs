//! Error types and user-friendly error handling for AXM.
//!
//! This module defines [`AxmError`], the error taxonomy shared by every
//! subsystem, plus [`ErrorContext`] which wraps an error with an actionable
//! suggestion and extra details for terminal display.
//!
//! # Error Philosophy
//!
//! Errors carry enough structure for callers to react programmatically
//! (unknown tool vs. failed write vs. unreachable server), while
//! [`user_friendly_error`] turns any [`anyhow::Error`] into a colored,
//! suggestion-bearing message for the CLI:
//!
//! ```rust,no_run
//! use axm::core::{AxmError, ErrorContext};
//!
//! let error = AxmError::ToolNotFound { name: "kodex".to_string() };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Run 'axm status' to see the supported tools");
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Comprehensive error type for all AXM operations.
///
/// Variants are grouped by subsystem: config file handling, tool lookup,
/// mutation of tool configs, skill management, and server probing.
/// Conversions from common library errors are provided via `#[from]` so
/// `?` works throughout the codebase.
#[derive(Error, Debug)]
pub enum AxmError {
    /// A tool configuration file exists but could not be parsed.
    ///
    /// An absent file is never a parse error; it is treated as an empty
    /// configuration by [`crate::dialect::load`].
    #[error("failed to parse config file '{path}': {reason}")]
    ConfigParse {
        /// Path of the offending file
        path: String,
        /// Parser message describing what went wrong
        reason: String,
    },

    /// The requested tool id is not in the supported tool table.
    #[error("unknown tool: {name}")]
    ToolNotFound {
        /// The tool id that was requested
        name: String,
    },

    /// Writing a tool configuration file failed.
    #[error("failed to write config file '{path}': {reason}")]
    WriteFailed {
        /// Path of the file that could not be written
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The requested catalog entry does not exist.
    #[error("no catalog entry with key '{key}'")]
    EntryNotFound {
        /// The catalog key that was requested
        key: String,
    },

    /// A skill to uninstall could not be located in the scanned scope.
    #[error("skill not found: {name}")]
    SkillNotFound {
        /// Directory name of the skill
        name: String,
    },

    /// A skill install target already exists on disk.
    #[error("skill '{name}' is already installed at {path}")]
    SkillAlreadyInstalled {
        /// Directory name of the skill
        name: String,
        /// Existing target path
        path: String,
    },

    /// Git executable was not found on the system.
    #[error("git command not found")]
    GitNotFound,

    /// A git clone invocation failed.
    #[error("failed to clone '{url}': {reason}")]
    GitCloneFailed {
        /// The repository URL that was being cloned
        url: String,
        /// Captured stderr or spawn failure
        reason: String,
    },

    /// An MCP server probe failed. Deliberately opaque: the probe speaks to
    /// arbitrary external processes and their failures are not enumerable.
    #[error("failed to probe server '{server}': {reason}")]
    ProbeFailed {
        /// Key of the server being probed
        server: String,
        /// Best-effort description of the failure
        reason: String,
    },

    /// IO operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML document parsing failed.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml_edit::TomlError),

    /// YAML frontmatter parsing failed.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Catch-all for errors that do not fit other variants.
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

/// An error bundled with a suggestion and details for terminal display.
///
/// The CLI converts every failure into an `ErrorContext` before printing,
/// so users see what failed, why, and what to try next.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying AXM error
    pub error: AxmError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: AxmError) -> Self {
        Self { error, suggestion: None, details: None }
    }

    /// Add an actionable suggestion, displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error, displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`AxmError`] variants and common IO errors and attaches
/// tailored suggestions; everything else is reported with its full cause
/// chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<AxmError>() {
        Ok(axm_error) => return create_error_context(axm_error),
        Err(other) => other,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(AxmError::Other {
                    message: error.to_string(),
                })
                .with_suggestion(
                    "Check file ownership or re-run with elevated permissions",
                )
                .with_details("AXM could not read or write a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(AxmError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error: include the full cause chain for diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(AxmError::Other { message })
}

/// Map each [`AxmError`] variant to a context with tailored suggestions.
fn create_error_context(error: AxmError) -> ErrorContext {
    let (suggestion, details): (Option<String>, Option<String>) = match &error {
        AxmError::ConfigParse { path, .. } => (
            Some(format!("Fix the syntax in {path} or move the file aside and retry")),
            Some(
                "AXM refuses to rewrite a config file it cannot parse, so your edits are never lost"
                    .to_string(),
            ),
        ),
        AxmError::ToolNotFound { .. } => (
            Some("Run 'axm status' to see the list of supported tools".to_string()),
            None,
        ),
        AxmError::WriteFailed { path, .. } => (
            Some(format!("Check permissions on {path} and that its directory exists")),
            None,
        ),
        AxmError::EntryNotFound { .. } => (
            Some("Run 'axm list' to see the available catalog entries".to_string()),
            None,
        ),
        AxmError::SkillNotFound { .. } => (
            Some("Run 'axm skills list' to see the installed skills".to_string()),
            None,
        ),
        AxmError::SkillAlreadyInstalled { path, .. } => (
            Some(format!("Remove {path} first if you want to reinstall")),
            None,
        ),
        AxmError::GitNotFound => (
            Some("Install git from https://git-scm.com/ and ensure it is in PATH".to_string()),
            Some("Skill installation clones the skill repository with the system git".to_string()),
        ),
        AxmError::GitCloneFailed { .. } => (
            Some("Check the repository URL and your network connection".to_string()),
            None,
        ),
        AxmError::ProbeFailed { .. } => (
            Some(
                "Check that the server command is installed and runs from your shell".to_string(),
            ),
            Some("Probing starts the server and asks it to list its tools".to_string()),
        ),
        _ => (None, None),
    };

    let mut context = ErrorContext::new(error);
    if let Some(suggestion) = suggestion {
        context = context.with_suggestion(suggestion);
    }
    if let Some(details) = details {
        context = context.with_details(details);
    }
    context
}
