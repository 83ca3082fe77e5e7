use std::io;

use thiserror::Error;

/// Library-wide error type for atelier operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// No active project has been bound yet.
    #[error("No active project configured. Run 'atelier use <path>' first.")]
    NoActiveProject,

    /// Project configuration file is missing (strict loader).
    #[error("Project config not found: {0}")]
    ProjectConfigMissing(String),

    /// Required environment variable is not set.
    #[error("Environment variable {0} is not set")]
    EnvironmentVariableMissing(String),

    /// Generation backend transport or protocol failure.
    #[error("{message}")]
    Generation {
        message: String,
        status: Option<u16>,
    },

    /// The generation call completed but produced no usable output.
    #[error("Generation returned empty output")]
    EmptyCompletion,
}

impl AppError {
    pub(crate) fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
