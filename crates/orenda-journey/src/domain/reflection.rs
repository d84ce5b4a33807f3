//! Saved journey reflections.

use chrono::{DateTime, Utc};
use orenda_content::domain::topics::TopicId;
use serde::{Deserialize, Serialize};

/// The user's answer to a scene question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    /// The pair in conversation, as `"a <-> b"`.
    pub scene: String,
    /// Question that was asked.
    pub question: String,
    /// Answer as given, trimmed.
    pub answer: String,
    /// When the answer was recorded.
    pub time: DateTime<Utc>,
}

/// Label identifying a scene by its pair.
#[must_use]
pub fn scene_label(pair: &(TopicId, TopicId)) -> String {
    format!("{} <-> {}", pair.0, pair.1)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_scene_label_joins_pair() {
        let pair = (TopicId::new("first"), TopicId::new("seventh"));

        assert_eq!(scene_label(&pair), "first <-> seventh");
    }

    #[test]
    fn test_reflection_serializes_with_plain_field_names() {
        let reflection = Reflection {
            scene: "second <-> eighth".to_owned(),
            question: "What are you holding onto right now?".to_owned(),
            answer: "An old apartment key.".to_owned(),
            time: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&reflection).unwrap();

        assert_eq!(json["scene"], "second <-> eighth");
        assert_eq!(json["time"], "2026-01-15T10:00:00Z");
    }
}
