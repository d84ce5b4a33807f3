//! Shared test helpers for CLI integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use orenda_cli::config::AppConfig;
use orenda_cli::terminal::TerminalView;
use orenda_content::application::loader::builtin_bundle;
use orenda_content::domain::pacing::PacingConfig;
use orenda_core::provider::ReflectionProvider;
use orenda_reflection::offline::OfflineReflectionProvider;
use orenda_store::file_store::FileStore;
use orenda_test_support::{FixedClock, RecordingPacer};

/// A state file under the system temp dir; removed when dropped.
pub struct TempState(pub PathBuf);

impl TempState {
    pub fn new() -> Self {
        Self(std::env::temp_dir().join(format!("orenda-cli-{}.json", uuid::Uuid::new_v4())))
    }

    /// A sibling path for export output; removed together with the state.
    pub fn export_path(&self) -> PathBuf {
        self.0.with_extension("export.json")
    }
}

impl Drop for TempState {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
        let _ = std::fs::remove_file(self.export_path());
    }
}

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> FixedClock {
    FixedClock(chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap())
}

/// Builds a config over the built-in content with no delays, a file store at
/// `state` and the given provider.
pub fn test_config(state: &TempState, provider: Arc<dyn ReflectionProvider>) -> AppConfig {
    AppConfig {
        content: Arc::new(builtin_bundle().unwrap()),
        pacing: PacingConfig::instant(),
        provider,
        store: Arc::new(FileStore::new(&state.0)),
        clock: Arc::new(fixed_clock()),
        pacer: Arc::new(RecordingPacer::new()),
        user_id: None,
    }
}

/// Same as [`test_config`] with the offline provider.
pub fn offline_config(state: &TempState) -> AppConfig {
    test_config(state, Arc::new(OfflineReflectionProvider))
}

/// A writer whose bytes can be read back after the view is consumed.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn view(&self) -> Box<TerminalView<SharedBuffer>> {
        Box::new(TerminalView::new(self.clone()))
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Reads the raw state file as a JSON object of key -> JSON string.
pub fn read_state(state: &TempState) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(&state.0).unwrap()).unwrap()
}
