//! Error types for the analytics engine

use thiserror::Error;

/// Errors that can occur during validation or persistence.
///
/// Nothing here is fatal to a running session: an empty filter result and a
/// missing previous period are modeled states (see [`crate::dashboard`]),
/// not errors, and malformed rows on load are dropped rather than reported.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a session must include either activity time or sleep time")]
    EmptyRecord,

    #[error("value out of range for {field}: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
