//! Core types and functionality for AXM
//!
//! This module provides the foundation of AXM's type system: the error
//! taxonomy every subsystem reports through, and the user-facing error
//! context machinery the CLI renders.
//!
//! # Error Management
//!
//! AXM distinguishes error classes so callers can react programmatically:
//! - **Strongly-typed errors** ([`AxmError`]) for precise handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable
//!   suggestions for CLI users
//! - **Automatic conversion** from common library errors via `From` impls

pub mod error;

pub use error::{AxmError, ErrorContext, user_friendly_error};
