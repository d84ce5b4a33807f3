//! The validated content bundle.

use std::collections::BTreeSet;

use orenda_core::error::BridgeError;
use serde::{Deserialize, Serialize};

use super::journey::JourneyScript;
use super::script::DialogueScript;
use super::topics::{ProbeSequence, Topic, TopicId};

/// Everything a session reads from static configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBundle {
    /// Topic catalog.
    pub topics: Vec<Topic>,
    /// Probe order.
    pub probe_sequence: ProbeSequence,
    /// Scripted conversation lines.
    pub script: DialogueScript,
    /// Journey scenes, if this bundle ships any.
    #[serde(default)]
    pub journey: Option<JourneyScript>,
}

impl ContentBundle {
    /// Looks up a topic by id.
    #[must_use]
    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| &t.id == id)
    }

    /// Display name for a topic id, falling back to the raw id.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a TopicId) -> &'a str {
        self.topic(id).map_or(id.as_str(), |t| t.display_name.as_str())
    }

    /// Checks every cross-reference and cardinality rule.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` describing the first problem found.
    pub fn validate(&self) -> Result<(), BridgeError> {
        self.validate_topics()?;
        self.validate_probe_sequence()?;
        self.validate_script()?;
        if let Some(journey) = &self.journey {
            self.validate_journey(journey)?;
        }
        Ok(())
    }

    fn validate_topics(&self) -> Result<(), BridgeError> {
        if self.topics.is_empty() {
            return Err(config("topic catalog is empty"));
        }
        let mut seen = BTreeSet::new();
        for topic in &self.topics {
            if !seen.insert(&topic.id) {
                return Err(config(format!("duplicate topic id '{}'", topic.id)));
            }
            if topic.display_name.trim().is_empty() {
                return Err(config(format!("topic '{}' has no display_name", topic.id)));
            }
            if topic.theme_words.is_empty() {
                return Err(config(format!("topic '{}' has no theme_words", topic.id)));
            }
        }
        Ok(())
    }

    fn validate_probe_sequence(&self) -> Result<(), BridgeError> {
        let seq = &self.probe_sequence;
        if seq.initial.is_empty() {
            return Err(config("probe_sequence.initial is empty"));
        }
        let mut seen = BTreeSet::new();
        for id in seq.initial.iter().chain(&seq.extension) {
            self.require_topic(id, "probe_sequence")?;
            if !seen.insert(id) {
                return Err(config(format!("topic '{id}' is probed twice")));
            }
        }
        Ok(())
    }

    fn validate_script(&self) -> Result<(), BridgeError> {
        let script = &self.script;
        if script.opener.lines.is_empty() {
            return Err(config("script.opener.lines is empty"));
        }
        let replies = script.opener.replies.len();
        if !(2..=3).contains(&replies) {
            return Err(config(format!(
                "script.opener.replies must hold 2 or 3 replies, found {replies}"
            )));
        }
        if script.closing.lines.len() != 2 {
            return Err(config(format!(
                "script.closing.lines must hold exactly 2 lines, found {}",
                script.closing.lines.len()
            )));
        }
        if script.closing.remark.trim().is_empty() {
            return Err(config("script.closing.remark is empty"));
        }
        Ok(())
    }

    fn validate_journey(&self, journey: &JourneyScript) -> Result<(), BridgeError> {
        self.require_topic(&journey.host, "journey.host")?;
        if journey.scene_limit == 0 {
            return Err(config("journey.scene_limit must be at least 1"));
        }
        for (index, scene) in journey.scenes.iter().enumerate() {
            let (a, b) = &scene.pair;
            self.require_topic(a, "journey.scenes.pair")?;
            self.require_topic(b, "journey.scenes.pair")?;
            for line in &scene.lines {
                if !line.is_system() && line.speaker != a.as_str() && line.speaker != b.as_str() {
                    return Err(config(format!(
                        "journey scene {index}: speaker '{}' is not part of the pair",
                        line.speaker
                    )));
                }
            }
        }
        Ok(())
    }

    fn require_topic(&self, id: &TopicId, field: &str) -> Result<(), BridgeError> {
        if self.topic(id).is_none() {
            return Err(config(format!("{field} references unknown topic '{id}'")));
        }
        Ok(())
    }
}

fn config(msg: impl Into<String>) -> BridgeError {
    BridgeError::Config(msg.into())
}
