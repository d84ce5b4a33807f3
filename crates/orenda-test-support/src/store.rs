//! Test stores — mock `KeyValueStore` implementations for tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use orenda_core::error::BridgeError;
use orenda_core::store::KeyValueStore;

/// An in-memory store. Clones share the same map, so a test can keep a
/// handle to inspect what the code under test wrote, or reuse it to
/// simulate a reload.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    writes: Arc<Mutex<usize>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
            writes: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns the raw value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Returns the number of `set` calls observed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), BridgeError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A store that always returns a persistence error. Useful for testing that
/// storage failures never interrupt a session.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, BridgeError> {
        Err(BridgeError::Persistence("storage unavailable".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), BridgeError> {
        Err(BridgeError::Persistence("storage unavailable".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), BridgeError> {
        Err(BridgeError::Persistence("storage unavailable".into()))
    }
}
