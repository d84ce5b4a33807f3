//! Orenda Bridge — CLI error types.

use orenda_core::error::BridgeError;
use thiserror::Error;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum AppError {
    /// An error surfaced by the conversation engine. Unusable content,
    /// pacing or provider configuration arrives as `BridgeError::Config`.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Terminal or file I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Bridge(BridgeError::Config(_)) => 2,
            Self::Bridge(_) | Self::Io(_) => 1,
        }
    }
}
