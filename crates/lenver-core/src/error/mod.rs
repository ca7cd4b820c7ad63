//! Error types and result aliases for lenver operations.
//!
//! Parsing and comparing versions never fail. The errors here cover the
//! remaining edges of the workspace: loose component construction,
//! configuration files and I/O.

use crate::types::ComponentError;
use thiserror::Error;

/// Unified error type for all lenver operations
#[derive(Error, Debug)]
pub enum LenverError {
    // Construction errors
    #[error("Cannot build version from components: {0}")]
    Component(#[from] ComponentError),

    // Config errors
    #[error("Failed to parse lenver.toml: {message} at line {line}, column {column}")]
    TomlParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Input errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // Output errors
    #[error("JSON error: {message}")]
    Json { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for lenver operations
pub type LenverResult<T> = Result<T, LenverError>;

impl LenverError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a configuration validation error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            LenverError::Component(_) => Some(
                "Components must be non-negative integers (major, minor, patch) or text (pre_release, build)",
            ),
            LenverError::TomlParse { .. } => Some("Check lenver.toml for TOML syntax errors"),
            LenverError::ConfigValidation { .. } => {
                Some("Run 'lenver check' to inspect the effective configuration")
            },
            LenverError::InvalidInput { .. } => Some("Run 'lenver --help' to see expected arguments"),
            LenverError::Json { .. } | LenverError::Io { .. } => None,
        }
    }
}
