//! Error types shared across the engine.

use thiserror::Error;

/// Top-level error type for the conversation engine.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Static configuration could not be read or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// The reflection provider failed (network, status, payload, timeout).
    #[error("reflection provider error: {0}")]
    Provider(String),

    /// The key-value store could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A request was not valid for the current session state.
    #[error("validation error: {0}")]
    Validation(String),

    /// A value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
