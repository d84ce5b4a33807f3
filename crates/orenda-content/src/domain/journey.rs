//! Journey scenes: scripted dialogues between two houses.

use serde::{Deserialize, Serialize};

use super::topics::TopicId;

/// Speaker label for narrator lines; the last one in a scene is its question.
pub const SYSTEM_SPEAKER: &str = "system";

fn default_scene_limit() -> usize {
    3
}

/// One line of a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneLine {
    /// A topic id from the scene's pair, or `"system"`.
    pub speaker: String,
    /// Spoken text.
    pub text: String,
}

impl SceneLine {
    /// Whether this is a narrator line.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.speaker == SYSTEM_SPEAKER
    }
}

/// A dialogue between two houses, ending in a reflection question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// The two houses in conversation.
    pub pair: (TopicId, TopicId),
    /// Lines in playback order.
    pub lines: Vec<SceneLine>,
}

impl Scene {
    /// The question asked of the user: the last narrator line, if any.
    #[must_use]
    pub fn question(&self) -> Option<&str> {
        self.lines
            .iter()
            .rev()
            .find(|l| l.is_system())
            .map(|l| l.text.as_str())
    }
}

/// The full journey script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyScript {
    /// The house that welcomes the user.
    pub host: TopicId,
    /// Welcome lines spoken by the host.
    pub intro: Vec<String>,
    /// Scenes in playback order.
    pub scenes: Vec<Scene>,
    /// Closing lines.
    pub outro: Vec<String>,
    /// How many scenes a single journey plays.
    #[serde(default = "default_scene_limit")]
    pub scene_limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_is_last_system_line() {
        let scene: Scene = serde_json::from_value(serde_json::json!({
            "pair": ["first", "seventh"],
            "lines": [
                { "speaker": "system", "text": "Listen." },
                { "speaker": "first", "text": "I arrive." },
                { "speaker": "system", "text": "Where do you meet others?" }
            ]
        }))
        .unwrap();

        assert_eq!(scene.pair.0, TopicId::new("first"));
        assert_eq!(scene.question(), Some("Where do you meet others?"));
    }

    #[test]
    fn test_scene_limit_defaults_to_three() {
        let script: JourneyScript = serde_json::from_value(serde_json::json!({
            "host": "second",
            "intro": [],
            "scenes": [],
            "outro": []
        }))
        .unwrap();

        assert_eq!(script.scene_limit, 3);
    }
}
