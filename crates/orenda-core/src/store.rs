//! Key-value store abstraction.

use async_trait::async_trait;

use crate::error::BridgeError;

/// A simple key → JSON-string store used for best-effort local persistence.
///
/// Values are opaque strings to the store; callers own the encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, BridgeError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), BridgeError>;

    /// Removes `key` if present.
    async fn remove(&self, key: &str) -> Result<(), BridgeError>;
}
