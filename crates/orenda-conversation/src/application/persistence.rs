//! Best-effort session persistence.
//!
//! The transcript and relationship depth are written after every turn and
//! read once at start. Storage failures are logged and otherwise ignored:
//! the in-memory session always carries on.

use std::sync::Arc;

use orenda_core::error::BridgeError;
use orenda_core::store::KeyValueStore;
use tracing::{debug, warn};

use crate::domain::state::{ConversationState, LogEntry};

/// Store key holding the transcript as a JSON array.
pub const TRANSCRIPT_KEY: &str = "orenda.transcript";
/// Store key holding the relationship depth as a JSON number.
pub const DEPTH_KEY: &str = "orenda.depth";

/// Whatever could be recovered from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSession {
    /// Persisted transcript, empty when absent or unreadable.
    pub transcript: Vec<LogEntry>,
    /// Persisted depth, zero when absent or unreadable.
    pub relationship_depth: u32,
}

/// Reads and writes session state through a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionPersistence {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPersistence").finish_non_exhaustive()
    }
}

impl SessionPersistence {
    /// Creates persistence backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the persisted session. Each key is read independently; missing,
    /// unreadable or corrupt values fall back to empty defaults.
    pub async fn load(&self) -> PersistedSession {
        let transcript = self
            .read_json::<Vec<LogEntry>>(TRANSCRIPT_KEY)
            .await
            .unwrap_or_default();
        let relationship_depth = self.read_json::<u32>(DEPTH_KEY).await.unwrap_or_default();
        debug!(
            entries = transcript.len(),
            relationship_depth, "loaded persisted session"
        );
        PersistedSession {
            transcript,
            relationship_depth,
        }
    }

    /// Writes the transcript and depth. Failures are logged only.
    pub async fn save(&self, state: &ConversationState) {
        if let Err(e) = self.try_save(state).await {
            warn!(error = %e, "failed to persist session, continuing in memory");
        }
    }

    /// Removes every persisted session key.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Persistence` if the store rejects a removal.
    pub async fn clear(&self) -> Result<(), BridgeError> {
        self.store.remove(TRANSCRIPT_KEY).await?;
        self.store.remove(DEPTH_KEY).await
    }

    async fn try_save(&self, state: &ConversationState) -> Result<(), BridgeError> {
        let transcript = serde_json::to_string(state.transcript())?;
        self.store.set(TRANSCRIPT_KEY, &transcript).await?;
        self.store
            .set(DEPTH_KEY, &state.relationship_depth().to_string())
            .await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read persisted value");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "ignoring corrupt persisted value");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use orenda_content::domain::topics::TopicId;
    use orenda_core::provider::Role;
    use orenda_test_support::{FailingStore, InMemoryStore};

    use super::*;

    fn state_with(depth: u32, lines: &[&str]) -> ConversationState {
        let mut state = ConversationState::new(vec![TopicId::new("first")]);
        for line in lines {
            state.append(LogEntry {
                role: Role::User,
                text: (*line).to_owned(),
                topic: None,
                timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            });
        }
        for _ in 0..depth {
            state.complete_exchange();
        }
        state
    }

    #[tokio::test]
    async fn test_save_then_load_restores_transcript_and_depth() {
        // Arrange
        let store = InMemoryStore::new();
        let persistence = SessionPersistence::new(Arc::new(store.clone()));
        let state = state_with(3, &["one", "two"]);

        // Act
        persistence.save(&state).await;
        let loaded = persistence.load().await;

        // Assert
        assert_eq!(loaded.relationship_depth, 3);
        assert_eq!(loaded.transcript, state.transcript());
        assert_eq!(store.raw(DEPTH_KEY).as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_load_from_empty_store_yields_defaults() {
        let persistence = SessionPersistence::new(Arc::new(InMemoryStore::new()));

        assert_eq!(persistence.load().await, PersistedSession::default());
    }

    #[tokio::test]
    async fn test_corrupt_transcript_does_not_discard_depth() {
        let store = InMemoryStore::with_entries([(TRANSCRIPT_KEY, "{not json"), (DEPTH_KEY, "12")]);
        let persistence = SessionPersistence::new(Arc::new(store));

        let loaded = persistence.load().await;

        assert!(loaded.transcript.is_empty());
        assert_eq!(loaded.relationship_depth, 12);
    }

    #[tokio::test]
    async fn test_failing_store_is_tolerated() {
        let persistence = SessionPersistence::new(Arc::new(FailingStore));

        persistence.save(&state_with(1, &["hi"])).await;
        let loaded = persistence.load().await;

        assert_eq!(loaded, PersistedSession::default());
        assert!(persistence.clear().await.is_err());
    }

    #[tokio::test]
    async fn test_clear_removes_both_keys() {
        let store = InMemoryStore::with_entries([(TRANSCRIPT_KEY, "[]"), (DEPTH_KEY, "4")]);
        let persistence = SessionPersistence::new(Arc::new(store.clone()));

        persistence.clear().await.unwrap();

        assert_eq!(store.raw(TRANSCRIPT_KEY), None);
        assert_eq!(store.raw(DEPTH_KEY), None);
    }
}
