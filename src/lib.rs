//! wrk - a small terminal workflow wrapper around git
//!
//! Shells out to git to switch branches, save and restore work in progress
//! as stash-backed sessions, and stage files through an interactive picker.
//!
//! # Modules
//!
//! - [`git`] - Process runner, porcelain parsers and typed git operations
//! - [`tui`] - List picker state machine and commit message prompt
//! - [`workflow`] - One function per CLI verb
//! - [`clipboard`] - Explicit clipboard handle
//! - [`config`] - Layered configuration
//! - [`error`] - Error types

pub mod clipboard;
pub mod config;
pub mod error;
pub mod git;
pub mod tui;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
