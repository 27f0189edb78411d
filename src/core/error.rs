//! Custom error types for simcli
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for simcli operations
#[derive(Error, Debug)]
pub enum SimCliError {
    /// Missing or malformed command argument
    #[error("{0}")]
    InvalidArgument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for simcli operations
pub type Result<T> = std::result::Result<T, SimCliError>;

impl SimCliError {
    /// Create an argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from parsing command arguments
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
