//! Session export document.

use chrono::{DateTime, Utc};
use orenda_core::error::BridgeError;
use serde::{Deserialize, Serialize};

use super::detector::BirthData;
use super::state::{LogEntry, Stage};

/// A user-requested snapshot of a session, written as pretty JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionExport {
    /// When the export was taken.
    pub exported_at: DateTime<Utc>,
    /// Relationship depth at export time.
    pub relationship_depth: u32,
    /// Stage at export time; absent when exported from storage alone.
    #[serde(default)]
    pub stage: Option<Stage>,
    /// Birth details collected during the session.
    #[serde(default)]
    pub birth_data: Option<BirthData>,
    /// Full transcript, oldest first.
    pub transcript: Vec<LogEntry>,
}

impl SessionExport {
    /// Serializes the export as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an export previously produced by [`SessionExport::to_json`].
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Serialization` if the text is not a valid export.
    pub fn from_json(text: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Number of transcript entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.transcript.len()
    }
}
