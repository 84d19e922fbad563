//! Utility modules for cross-platform operation
//!
//! - [`fs`]: atomic file writes and JSON read/write helpers
//! - [`platform`]: home directory lookup, path expansion, git command name
//! - [`progress`]: terminal-aware spinners

pub mod fs;
pub mod platform;
pub mod progress;
