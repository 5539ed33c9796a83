//! Error types for wrk
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for wrk
#[derive(Error, Debug)]
pub enum Error {
    #[error("{program} is not installed or not in PATH")]
    ToolNotFound { program: String },

    #[error("{command} failed: {message}")]
    ExecutionFailed { command: String, message: String },

    #[error("No files changed")]
    NothingChanged,

    #[error("No sessions found")]
    NoSessions,

    #[error("Nothing to commit")]
    NothingToCommit,

    #[error("Commit message is empty")]
    EmptyCommitMessage,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Early exits that report a state rather than a failure
    pub fn is_benign(&self) -> bool {
        matches!(self, Error::NothingChanged | Error::NoSessions)
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        if self.is_benign() { 0 } else { 1 }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// TUI-related errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Failed to initialize terminal: {0}")]
    InitFailed(String),

    #[error("Failed to restore terminal: {0}")]
    RestoreFailed(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Event handling error: {0}")]
    EventError(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<arboard::Error> for Error {
    fn from(e: arboard::Error) -> Self {
        Error::Clipboard(e.to_string())
    }
}
