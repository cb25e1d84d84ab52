//! Error types for teamtrack.

use thiserror::Error;

/// Errors that can occur in teamtrack operations.
///
/// Domain mutations never return these: rejected input and unknown ids are
/// silent no-ops. These cover configuration, storage and parsing.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid {kind}: '{value}' (expected one of: {expected})")]
    InvalidValue {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

impl TrackerError {
    pub(crate) fn invalid(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        TrackerError::InvalidValue {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Result type alias for teamtrack operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
