//! JSON-file implementation of the `KeyValueStore` trait.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use orenda_core::error::BridgeError;
use orenda_core::store::KeyValueStore;
use tokio::sync::Mutex;
use tracing::debug;

/// A key-value store backed by one JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so readers never observe a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, BridgeError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(BridgeError::Persistence(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            BridgeError::Persistence(format!("{} is not a valid store: {e}", self.path.display()))
        })
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), BridgeError> {
        let text = serde_json::to_string_pretty(map)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, text).await.map_err(|e| {
            BridgeError::Persistence(format!("failed to write {}: {e}", temp.display()))
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            BridgeError::Persistence(format!(
                "failed to replace {}: {e}",
                self.path.display()
            ))
        })?;
        debug!(path = %self.path.display(), keys = map.len(), "store written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), BridgeError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}
