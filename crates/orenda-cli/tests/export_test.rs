//! Integration tests for the export and reset commands.

mod common;

use orenda_cli::commands::{run_chat, run_export, run_journey, run_reset};
use orenda_conversation::domain::export::SessionExport;

#[tokio::test]
async fn test_export_reads_persisted_state() {
    // Arrange
    let state = common::TempState::new();
    let config = common::offline_config(&state);
    run_chat(
        &config,
        "1\n3/14/1990, 10:32am, Austin TX\n".as_bytes(),
        common::SharedBuffer::default().view(),
    )
    .await
    .unwrap();

    // Act
    run_export(&config, Some(&state.export_path())).await.unwrap();

    // Assert
    let text = std::fs::read_to_string(state.export_path()).unwrap();
    let export = SessionExport::from_json(&text).unwrap();
    assert_eq!(export.relationship_depth, 2);
    assert_eq!(export.entry_count(), 7);
    assert_eq!(export.stage, None);
}

#[tokio::test]
async fn test_export_of_fresh_state_is_empty() {
    let state = common::TempState::new();
    let config = common::offline_config(&state);

    run_export(&config, Some(&state.export_path())).await.unwrap();

    let export =
        SessionExport::from_json(&std::fs::read_to_string(state.export_path()).unwrap()).unwrap();
    assert_eq!(export.relationship_depth, 0);
    assert_eq!(export.entry_count(), 0);
}

#[tokio::test]
async fn test_reset_forgets_session_and_reflections() {
    let state = common::TempState::new();
    let config = common::offline_config(&state);
    run_chat(&config, "1\n".as_bytes(), common::SharedBuffer::default().view())
        .await
        .unwrap();
    run_journey(&config, "a\nb\nc\n".as_bytes(), common::SharedBuffer::default().view())
        .await
        .unwrap();

    run_reset(&config).await.unwrap();

    let saved = common::read_state(&state);
    assert!(saved.get("orenda.depth").is_none());
    assert!(saved.get("orenda.transcript").is_none());
    assert!(saved.get("orenda.reflections").is_none());
}
