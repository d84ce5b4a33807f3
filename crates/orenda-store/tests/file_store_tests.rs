//! Integration tests for `FileStore`.

use std::path::PathBuf;

use orenda_core::error::BridgeError;
use orenda_core::store::KeyValueStore;
use orenda_store::file_store::FileStore;
use uuid::Uuid;

/// A unique path under the system temp dir; removed when dropped.
struct TempFile(PathBuf);

impl TempFile {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("orenda-store-{}.json", Uuid::new_v4())))
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

// --- get ---

#[tokio::test]
async fn test_get_from_missing_file_returns_none() {
    let file = TempFile::new();
    let store = FileStore::new(&file.0);

    assert_eq!(store.get("orenda.depth").await.unwrap(), None);
    assert!(!file.0.exists());
}

#[tokio::test]
async fn test_get_from_corrupt_file_is_a_persistence_error() {
    let file = TempFile::new();
    std::fs::write(&file.0, "{{ definitely not json").unwrap();
    let store = FileStore::new(&file.0);

    assert!(matches!(
        store.get("orenda.depth").await,
        Err(BridgeError::Persistence(_))
    ));
}

// --- set + get round-trip ---

#[tokio::test]
async fn test_set_then_get_round_trips_through_disk() {
    // Arrange
    let file = TempFile::new();
    let store = FileStore::new(&file.0);

    // Act
    store.set("orenda.depth", "7").await.unwrap();
    store
        .set("orenda.transcript", r#"[{"role":"user","text":"hi"}]"#)
        .await
        .unwrap();
    let reopened = FileStore::new(&file.0);

    // Assert
    assert_eq!(reopened.get("orenda.depth").await.unwrap().as_deref(), Some("7"));
    assert_eq!(
        reopened.get("orenda.transcript").await.unwrap().as_deref(),
        Some(r#"[{"role":"user","text":"hi"}]"#)
    );
    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file.0).unwrap()).unwrap();
    assert_eq!(on_disk["orenda.depth"], "7");
}

#[tokio::test]
async fn test_set_overwrites_and_leaves_no_temp_file() {
    let file = TempFile::new();
    let store = FileStore::new(&file.0);

    store.set("orenda.depth", "1").await.unwrap();
    store.set("orenda.depth", "2").await.unwrap();

    assert_eq!(store.get("orenda.depth").await.unwrap().as_deref(), Some("2"));
    let mut temp = file.0.clone().into_os_string();
    temp.push(".tmp");
    assert!(!PathBuf::from(temp).exists());
}

// --- remove ---

#[tokio::test]
async fn test_remove_deletes_only_the_named_key() {
    let file = TempFile::new();
    let store = FileStore::new(&file.0);
    store.set("orenda.depth", "3").await.unwrap();
    store.set("orenda.reflections", "[]").await.unwrap();

    store.remove("orenda.depth").await.unwrap();
    store.remove("never.written").await.unwrap();

    assert_eq!(store.get("orenda.depth").await.unwrap(), None);
    assert_eq!(
        store.get("orenda.reflections").await.unwrap().as_deref(),
        Some("[]")
    );
}
