//! Reflection provider abstraction.
//!
//! A reflection provider turns the latest user message plus topic and
//! transcript context into a line of agent dialogue. The production
//! implementation is a remote HTTP endpoint; callers own the timeout and
//! fallback policy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Who authored a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person at the keyboard.
    User,
    /// The bridge voice.
    Agent,
}

/// Why a reflection is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    /// First reflection on a newly opened topic.
    Opening,
    /// Response to the user's reply within a topic.
    FollowUp,
    /// Gently steer the user back toward sharing birth details.
    Steer,
}

impl Stance {
    /// Wire label for the stance.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::FollowUp => "follow_up",
            Self::Steer => "steer",
        }
    }
}

/// Topic context passed along with a reflection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicContext {
    /// Display name of the topic.
    pub name: String,
    /// Theme words seeding the reflection.
    pub theme_words: Vec<String>,
    /// Voice descriptor for the topic.
    pub voice: String,
}

/// One prior transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    /// Author of the line.
    pub role: Role,
    /// Line text.
    pub text: String,
}

/// Input to a reflection provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionRequest {
    /// The most recent user message.
    pub user_message: String,
    /// Topic context, absent while gathering input.
    pub topic: Option<TopicContext>,
    /// Purpose of the request.
    pub stance: Stance,
    /// Running relationship depth.
    pub relationship_depth: u32,
    /// Human-readable label of the depth tier.
    pub depth_level: String,
    /// Most recent transcript lines, oldest first.
    pub history: Vec<HistoryTurn>,
    /// Optional caller identifier forwarded to the endpoint.
    pub user_id: Option<String>,
}

/// Output of a reflection provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionResult {
    /// Whether the provider considers the response usable.
    pub success: bool,
    /// Generated line of dialogue.
    pub response: String,
}

impl ReflectionResult {
    /// Returns the response text if it is usable as an agent line.
    #[must_use]
    pub fn usable_text(&self) -> Option<&str> {
        let text = self.response.trim();
        (self.success && !text.is_empty()).then_some(text)
    }
}

/// Source of generated agent dialogue.
#[async_trait]
pub trait ReflectionProvider: Send + Sync {
    /// Requests a reflection.
    async fn reflect(&self, request: &ReflectionRequest) -> Result<ReflectionResult, BridgeError>;

    /// Best-effort warm-up call made once at startup.
    async fn warm_up(&self) -> Result<(), BridgeError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_text_requires_success_and_content() {
        let ok = ReflectionResult {
            success: true,
            response: "  the tide turns  ".to_owned(),
        };
        let failed = ReflectionResult {
            success: false,
            response: "ignored".to_owned(),
        };
        let blank = ReflectionResult {
            success: true,
            response: "   ".to_owned(),
        };

        assert_eq!(ok.usable_text(), Some("the tide turns"));
        assert_eq!(failed.usable_text(), None);
        assert_eq!(blank.usable_text(), None);
    }

    #[test]
    fn test_stance_wire_labels() {
        assert_eq!(Stance::Opening.as_str(), "opening");
        assert_eq!(Stance::FollowUp.as_str(), "follow_up");
        assert_eq!(Stance::Steer.as_str(), "steer");
    }
}
