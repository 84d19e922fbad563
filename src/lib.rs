//! axm - Agent eXtension Manager
//!
//! A CLI for managing extensions (MCP servers and skills) across the
//! configuration files of AI coding tools: Claude, Gemini, OpenCode,
//! Qoder, CodeBuddy, Copilot, and Codex.
//!
//! # Architecture Overview
//!
//! axm reconciles a **catalog** of known extensions against the config
//! files the tools actually read. Each tool's file format (JSON or TOML),
//! server entry layout, and skills directory are described by a static
//! [`tools::ToolDescriptor`]; everything else is generic over that table.
//!
//! Edits are surgical: config files are parsed into order-preserving
//! trees, only the extension entries are touched, and the result is
//! written back atomically. A TOML config keeps its comments; a JSON
//! config keeps its key order.
//!
//! # Core Modules
//!
//! - [`catalog`] - Curated and user-defined extension entries
//! - [`tools`] - The static table of supported tools
//! - [`dialect`] - Round-trip safe JSON/TOML parsing and serialization
//! - [`schema`] - Reading and writing MCP server entries in config trees
//! - [`scanner`] - Discovering what is installed, without ever failing
//! - [`installer`] - Installing and removing extensions
//! - [`skills`] - Skill directories, metadata, and git-based installs
//! - [`probe`] - Live capability inspection of MCP servers
//! - [`cli`] - The command-line surface
//!
//! # Supporting Modules
//!
//! - [`core`] - Error types and user-facing error presentation
//! - [`utils`] - Cross-platform paths, atomic writes, progress output

pub mod catalog;
pub mod cli;
pub mod core;
pub mod dialect;
pub mod installer;
pub mod probe;
pub mod scanner;
pub mod schema;
pub mod skills;
pub mod tools;
pub mod utils;
