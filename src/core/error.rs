//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ClearNavigatorError`] which covers every failure mode of the
//! metadata layer and the command orchestrator. It uses `thiserror` for ergonomic error
//! definitions and includes constructors for the structured variants.
//!
//! # Public API
//! - [`ClearNavigatorError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ClearNavigatorError>`
//!
//! # Error Categories
//! - **Process execution**: the tool (or a viewer) could not be launched
//! - **Metadata**: `describe` failed or returned malformed output
//! - **Interaction**: the user cancelled, or a prompt got an answer of the wrong kind
//! - **Commands**: disabled or unknown commands

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for clear-navigator
#[derive(Error, Debug)]
pub enum ClearNavigatorError {
    // Process errors
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Cannot run an empty command line")]
    EmptyCommand,

    // Metadata errors
    #[error("Cannot describe '{path}': {reason}")]
    Describe { path: PathBuf, reason: String },

    // Interaction errors
    #[error("Cancelled by user")]
    UserCancelled,

    #[error("Unexpected answer, expected {expected}")]
    UnexpectedResponse { expected: &'static str },

    #[error("Command is not waiting for input")]
    InvalidCommandState,

    // Command errors
    #[error("'{command}' is not available for the selected file(s)")]
    CommandDisabled { command: String },

    #[error("Unknown command: '{name}'")]
    UnknownCommand { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using ClearNavigatorError
pub type Result<T> = std::result::Result<T, ClearNavigatorError>;

impl ClearNavigatorError {
    /// Create a spawn error for a program that could not be started
    pub fn spawn_failed(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a describe error for a path
    pub fn describe_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Describe {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a disabled command error
    pub fn command_disabled(command: impl Into<String>) -> Self {
        Self::CommandDisabled {
            command: command.into(),
        }
    }

    /// Create an unknown command error
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// True for errors that should end a command without any output
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}
