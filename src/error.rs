//! Custom error types for cmdterm.

use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for cmdterm operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open pty: {0}")]
    PtyOpen(String),

    #[error("Failed to create child process: {0}")]
    Spawn(String),

    #[error("Could not parse command: {0}")]
    InvalidCommand(String),

    #[error("Command is empty")]
    EmptyCommand,

    #[error("Command is too long ({0} bytes)")]
    CommandTooLong(usize),

    #[error("A command is already running")]
    Busy,

    #[error("Failed to read {path}: {reason}")]
    Telemetry { path: PathBuf, reason: String },
}

/// Result type alias using our custom Error.
pub type Result<T> = std::result::Result<T, Error>;
