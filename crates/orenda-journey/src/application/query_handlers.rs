//! Query handlers for saved reflections.

use orenda_core::error::BridgeError;
use orenda_core::store::KeyValueStore;

use crate::domain::reflection::Reflection;

/// Store key holding saved reflections as a JSON array.
pub const REFLECTIONS_KEY: &str = "orenda.reflections";

/// Loads every saved reflection, oldest first.
///
/// # Errors
///
/// Returns `BridgeError::Persistence` if the store cannot be read, or
/// `BridgeError::Serialization` if the stored list is not valid JSON.
pub async fn load_reflections(store: &dyn KeyValueStore) -> Result<Vec<Reflection>, BridgeError> {
    match store.get(REFLECTIONS_KEY).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Removes every saved reflection.
///
/// # Errors
///
/// Returns `BridgeError::Persistence` if the store rejects the removal.
pub async fn clear_reflections(store: &dyn KeyValueStore) -> Result<(), BridgeError> {
    store.remove(REFLECTIONS_KEY).await
}
