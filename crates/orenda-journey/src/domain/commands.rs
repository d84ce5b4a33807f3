//! Commands accepted by the journey player.

use orenda_core::command::Command;
use uuid::Uuid;

/// Command carrying the user's answer to the current scene question.
#[derive(Debug, Clone)]
pub struct AnswerQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Answer as typed. Blank answers are not recorded.
    pub text: String,
}

impl AnswerQuestion {
    /// Creates a command with a fresh correlation ID.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

impl Command for AnswerQuestion {
    fn command_type(&self) -> &'static str {
        "journey.answer_question"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
