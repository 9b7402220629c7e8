//! Error types for rw-core

use thiserror::Error;

/// Core error type for Runway
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Project directory not found
    #[error("[E004] Project directory not found: {path}")]
    ProjectNotFound { path: String },

    /// E005: Configured virtual environment is missing or not a directory
    #[error("[E005] Virtual environment not found: {path}. Create it or remove `venv` from runway.yml")]
    VenvNotFound { path: String },

    /// E006: Failed to read the project's .env file
    #[error("[E006] Failed to read env file {path}: {message}")]
    EnvFileError { path: String, message: String },

    /// E007: A bootstrap step's command could not be spawned at all
    #[error("[E007] Failed to launch {step} command '{program}': {message}")]
    SpawnFailed {
        step: &'static str,
        program: String,
        message: String,
    },

    /// E008: A bootstrap step's command ran and exited non-zero.
    ///
    /// Carries the child's exit status so the launcher can propagate it
    /// as its own (fail-fast, `set -e` semantics).
    #[error("[E008] {step} step failed with exit status {status}")]
    StepFailed { step: &'static str, status: i32 },

    /// E009: A bootstrap step's command was killed by a signal (no exit status)
    #[error("[E009] {step} command terminated by signal")]
    StepTerminated { step: &'static str },

    /// E010: IO error
    #[error("[E010] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// The exit status Runway itself should terminate with for this error.
    ///
    /// Failed steps propagate the child's own status; everything else maps
    /// to a generic failure status of 1.
    pub fn exit_status(&self) -> i32 {
        match self {
            CoreError::StepFailed { status, .. } => *status,
            _ => 1,
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
