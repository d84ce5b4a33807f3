//! Scripted dialogue for the conversation stages.

use serde::{Deserialize, Serialize};

/// One selectable reply to the opener and the scripted answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenerReply {
    /// Text of the reply as the user sees and sends it.
    pub label: String,
    /// Agent response when this reply is chosen.
    pub response: String,
}

/// The scripted opener presented at `Intro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opener {
    /// Agent lines presented before the replies.
    pub lines: Vec<String>,
    /// Two or three selectable replies.
    pub replies: Vec<OpenerReply>,
}

/// Lines used while gathering birth details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatheringScript {
    /// Spoken once structured details are recognized.
    pub acknowledgement: String,
    /// Used when the provider cannot steer the user.
    pub steer_fallback: String,
}

/// Lines used at `Wrap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingScript {
    /// The two closing lines.
    pub lines: Vec<String>,
    /// Static acknowledgement for any input after the close.
    pub remark: String,
}

/// All scripted dialogue for a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueScript {
    /// Opener and replies.
    pub opener: Opener,
    /// Gathering-stage lines.
    pub gathering: GatheringScript,
    /// Prompts shown, one at random, while the agent pauses.
    #[serde(default)]
    pub breathing_prompts: Vec<String>,
    /// Closing lines.
    pub closing: ClosingScript,
}

impl Opener {
    /// Resolves user input to a reply index: a 1-based number or a label,
    /// compared case-insensitively.
    #[must_use]
    pub fn resolve_reply(&self, input: &str) -> Option<usize> {
        let input = input.trim();
        if let Ok(number) = input.parse::<usize>() {
            return (1..=self.replies.len()).contains(&number).then(|| number - 1);
        }
        self.replies
            .iter()
            .position(|r| r.label.trim().eq_ignore_ascii_case(input))
    }
}
