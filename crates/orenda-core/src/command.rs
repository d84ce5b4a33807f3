//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every user-initiated action on a session.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging).
    fn command_type(&self) -> &'static str;

    /// Correlation ID tying together every log line the command produces.
    fn correlation_id(&self) -> Uuid;
}
