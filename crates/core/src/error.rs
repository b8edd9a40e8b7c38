//! Error types for docent.
//!
//! A single error enum covers every failure category in the system:
//! configuration, I/O, embedding, index, LLM, and request validation.
//! Pipeline code raises typed errors; only the tool endpoint maps them
//! to the external result shape.

use thiserror::Error;

/// Unified error type for docent.
///
/// All fallible functions return `Result<T, DocentError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum DocentError {
    /// Configuration errors (invalid chunk sizes, unknown providers,
    /// embedding dimensionality mismatches). Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedding backend errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector index errors
    #[error("Index error: {0}")]
    Index(String),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Request validation errors (e.g. empty question)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for DocentError {
    fn from(err: serde_json::Error) -> Self {
        DocentError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for DocentError {
    fn from(err: serde_yaml::Error) -> Self {
        DocentError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with DocentError.
pub type DocentResult<T> = Result<T, DocentError>;
