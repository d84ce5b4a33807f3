//! Query handlers: session exports.

use orenda_core::clock::Clock;
use orenda_core::error::BridgeError;
use orenda_core::store::KeyValueStore;

use super::persistence::{DEPTH_KEY, TRANSCRIPT_KEY};
use super::turn_handlers::Session;
use crate::domain::export::SessionExport;
use crate::domain::state::LogEntry;

/// Snapshots a running session.
#[must_use]
pub fn export_session(session: &Session) -> SessionExport {
    let state = session.state();
    SessionExport {
        exported_at: session.clock().now(),
        relationship_depth: state.relationship_depth(),
        stage: Some(state.stage()),
        birth_data: state.birth_data().cloned(),
        transcript: state.transcript().to_vec(),
    }
}

/// Builds an export from persisted state alone, without starting a session.
///
/// Unlike a running session, a corrupt stored value is an error here: the
/// caller asked for exactly what is on disk.
///
/// # Errors
///
/// Returns `BridgeError::Persistence` if the store cannot be read, or
/// `BridgeError::Serialization` if a stored value is not valid JSON.
pub async fn export_persisted(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
) -> Result<SessionExport, BridgeError> {
    let transcript: Vec<LogEntry> = match store.get(TRANSCRIPT_KEY).await? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => Vec::new(),
    };
    let relationship_depth: u32 = match store.get(DEPTH_KEY).await? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => 0,
    };
    Ok(SessionExport {
        exported_at: clock.now(),
        relationship_depth,
        stage: None,
        birth_data: None,
        transcript,
    })
}
