//! Commands accepted by a conversation session.

use orenda_core::command::Command;
use uuid::Uuid;

/// Command carrying a free-text user submission.
#[derive(Debug, Clone)]
pub struct SubmitMessage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Raw text as typed by the user.
    pub text: String,
}

impl SubmitMessage {
    /// Creates a command with a fresh correlation ID.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

impl Command for SubmitMessage {
    fn command_type(&self) -> &'static str {
        "conversation.submit_message"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command selecting one of the opener replies.
#[derive(Debug, Clone)]
pub struct ChooseReply {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Zero-based index into the opener replies.
    pub index: usize,
}

impl ChooseReply {
    /// Creates a command with a fresh correlation ID.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            index,
        }
    }
}

impl Command for ChooseReply {
    fn command_type(&self) -> &'static str {
        "conversation.choose_reply"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
