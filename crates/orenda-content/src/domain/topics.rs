//! Topics ("houses") and the order in which they are probed.

use std::collections::BTreeSet;
use std::fmt;

use orenda_core::provider::TopicContext;
use serde::{Deserialize, Serialize};

/// Identifier of a topic, unique within a content bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub String);

impl TopicId {
    /// Creates a topic id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scripted lines used when the reflection provider is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicFallback {
    /// Line used to open the topic.
    #[serde(default)]
    pub opening: Option<String>,
    /// Line used to answer the user's reply within the topic.
    #[serde(default)]
    pub follow_up: Option<String>,
}

/// A named thematic unit with theme words and a voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier.
    pub id: TopicId,
    /// Name shown to the user.
    pub display_name: String,
    /// Theme words seeding reflections.
    pub theme_words: BTreeSet<String>,
    /// How this topic speaks.
    pub voice: String,
    /// Optional scripted fallback lines.
    #[serde(default)]
    pub fallback: TopicFallback,
}

impl Topic {
    /// Context handed to the reflection provider.
    #[must_use]
    pub fn context(&self) -> TopicContext {
        TopicContext {
            name: self.display_name.clone(),
            theme_words: self.theme_words.iter().cloned().collect(),
            voice: self.voice.clone(),
        }
    }

    /// Deterministic line opening this topic without the provider.
    #[must_use]
    pub fn opening_fallback(&self) -> String {
        self.fallback.opening.clone().unwrap_or_else(|| {
            format!(
                "{}. I keep circling {}, and I want to stay with that for a moment.",
                self.display_name,
                self.theme_phrase()
            )
        })
    }

    /// Deterministic follow-up line for this topic without the provider.
    #[must_use]
    pub fn follow_up_fallback(&self) -> String {
        self.fallback.follow_up.clone().unwrap_or_else(|| {
            format!(
                "I hear that. {} has room for it, even if it sits quietly for now.",
                self.display_name
            )
        })
    }

    /// Up to three theme words joined as prose: "a", "a and b", "a, b and c".
    fn theme_phrase(&self) -> String {
        let words: Vec<&str> = self.theme_words.iter().take(3).map(String::as_str).collect();
        match words.as_slice() {
            [] => "what is here".to_owned(),
            [one] => (*one).to_owned(),
            [init @ .., last] => format!("{} and {last}", init.join(", ")),
        }
    }
}

/// Which topics are probed, and in what order.
///
/// `initial` is probed first; once it is exhausted `extension` is appended
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSequence {
    /// Topics probed from the start.
    pub initial: Vec<TopicId>,
    /// Topics appended once the initial list is exhausted.
    #[serde(default)]
    pub extension: Vec<TopicId>,
}

impl ProbeSequence {
    /// Total number of topics probed in a full conversation.
    #[must_use]
    pub fn total(&self) -> usize {
        self.initial.len() + self.extension.len()
    }
}
