//! Conversation state: stage, topic cursor, depth and transcript.

use chrono::{DateTime, Utc};
use orenda_content::domain::topics::TopicId;
use orenda_core::provider::{HistoryTurn, Role};
use serde::{Deserialize, Serialize};

use super::detector::BirthData;

/// Conversation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Scripted opener with selectable replies.
    Intro,
    /// Waiting for birth details.
    GatheringInput,
    /// Walking the topic list.
    TopicProbing,
    /// Closed; further input is acknowledged only.
    Wrap,
}

/// One line of the transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Author of the line.
    pub role: Role,
    /// Line text.
    pub text: String,
    /// Topic being probed when the line was spoken, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<TopicId>,
    /// When the line was appended.
    pub timestamp: DateTime<Utc>,
}

/// Outcome of moving past the current topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicAdvance {
    /// Another topic is ready to open.
    Next(TopicId),
    /// Every topic has been probed; the stage is now `Wrap`.
    Exhausted,
}

/// The mutable record owned by a running session.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub(crate) stage: Stage,
    pub(crate) topic_index: usize,
    pub(crate) topics: Vec<TopicId>,
    pub(crate) extended: bool,
    pub(crate) relationship_depth: u32,
    pub(crate) transcript: Vec<LogEntry>,
    pub(crate) birth_data: Option<BirthData>,
}

impl ConversationState {
    /// Creates a fresh state at `Intro` that will probe `initial_topics`.
    #[must_use]
    pub fn new(initial_topics: Vec<TopicId>) -> Self {
        Self {
            stage: Stage::Intro,
            topic_index: 0,
            topics: initial_topics,
            extended: false,
            relationship_depth: 0,
            transcript: Vec::new(),
            birth_data: None,
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Index of the topic being probed.
    #[must_use]
    pub fn topic_index(&self) -> usize {
        self.topic_index
    }

    /// Topics queued for probing, extension included once appended.
    #[must_use]
    pub fn topics(&self) -> &[TopicId] {
        &self.topics
    }

    /// Whether the extension topics have been appended.
    #[must_use]
    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Completed exchanges, carried across sessions.
    #[must_use]
    pub fn relationship_depth(&self) -> u32 {
        self.relationship_depth
    }

    /// The transcript, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[LogEntry] {
        &self.transcript
    }

    /// Birth details captured while gathering, if any.
    #[must_use]
    pub fn birth_data(&self) -> Option<&BirthData> {
        self.birth_data.as_ref()
    }

    /// The topic currently being probed.
    #[must_use]
    pub fn current_topic(&self) -> Option<&TopicId> {
        if self.stage == Stage::TopicProbing {
            self.topics.get(self.topic_index)
        } else {
            None
        }
    }

    /// Folds persisted state into this one. Depth never decreases; a
    /// persisted transcript is adopted only if nothing was said yet.
    pub fn hydrate(&mut self, transcript: Vec<LogEntry>, relationship_depth: u32) {
        self.relationship_depth = self.relationship_depth.max(relationship_depth);
        if self.transcript.is_empty() {
            self.transcript = transcript;
        }
    }

    /// The last `n` transcript lines as provider history.
    #[must_use]
    pub fn history(&self, n: usize) -> Vec<HistoryTurn> {
        let start = self.transcript.len().saturating_sub(n);
        self.transcript[start..]
            .iter()
            .map(|e| HistoryTurn {
                role: e.role,
                text: e.text.clone(),
            })
            .collect()
    }

    pub(crate) fn append(&mut self, entry: LogEntry) {
        self.transcript.push(entry);
    }

    /// Records a completed exchange and returns the new depth.
    pub(crate) fn complete_exchange(&mut self) -> u32 {
        self.relationship_depth = self.relationship_depth.saturating_add(1);
        self.relationship_depth
    }

    pub(crate) fn enter_gathering(&mut self) {
        self.stage = Stage::GatheringInput;
    }

    pub(crate) fn record_birth_data(&mut self, data: BirthData) {
        self.birth_data = Some(data);
    }

    pub(crate) fn begin_probing(&mut self) {
        self.stage = Stage::TopicProbing;
        self.topic_index = 0;
    }

    /// Moves past the current topic. When the queue runs out the first time,
    /// `extension` is appended; when it runs out again the stage becomes
    /// `Wrap`.
    pub(crate) fn advance_topic(&mut self, extension: &[TopicId]) -> TopicAdvance {
        self.topic_index += 1;
        if self.topic_index >= self.topics.len() && !self.extended {
            self.topics.extend_from_slice(extension);
            self.extended = true;
        }
        match self.topics.get(self.topic_index) {
            Some(next) => TopicAdvance::Next(next.clone()),
            None => {
                self.stage = Stage::Wrap;
                TopicAdvance::Exhausted
            }
        }
    }
}
