//! Command runners.
//!
//! Each runner takes its input as an async line source and its output as a
//! transcript view, so the same code drives the terminal and the tests.

use std::path::Path;

use orenda_conversation::application::persistence::SessionPersistence;
use orenda_conversation::application::query_handlers::{export_persisted, export_session};
use orenda_conversation::application::turn_handlers::{Session, SessionDeps};
use orenda_conversation::domain::commands::SubmitMessage;
use orenda_conversation::domain::export::SessionExport;
use orenda_core::rng::SystemRng;
use orenda_core::view::TranscriptView;
use orenda_journey::application::player::{Journey, JourneyDeps};
use orenda_journey::application::query_handlers::clear_reflections;
use orenda_journey::domain::commands::AnswerQuestion;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::AppError;

/// A line typed during a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput<'a> {
    /// Leave the chat.
    Quit,
    /// Export the running session, to a file or to stdout.
    Export(Option<&'a str>),
    /// Anything else is handed to the session.
    Message(&'a str),
}

impl<'a> ChatInput<'a> {
    /// Recognizes the slash commands.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed == "/quit" {
            return Self::Quit;
        }
        if let Some(rest) = trimmed.strip_prefix("/export")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let path = rest.trim();
            return Self::Export((!path.is_empty()).then_some(path));
        }
        Self::Message(line)
    }
}

/// Writes an export to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns `AppError::Bridge` if encoding fails or `AppError::Io` if the
/// file cannot be written.
pub async fn write_export(export: &SessionExport, path: Option<&Path>) -> Result<(), AppError> {
    let json = export.to_json()?;
    match path {
        Some(path) => {
            tokio::fs::write(path, format!("{json}\n")).await?;
            info!(path = %path.display(), entries = export.entry_count(), "session exported");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Runs the bridge conversation until `/quit` or end of input.
///
/// # Errors
///
/// Returns `AppError::Io` if reading input fails.
pub async fn run_chat<R>(
    config: &AppConfig,
    input: R,
    view: Box<dyn TranscriptView>,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
{
    let mut session = Session::new(
        SessionDeps {
            content: config.content.clone(),
            provider: config.provider.clone(),
            store: config.store.clone(),
            clock: config.clock.clone(),
            pacer: config.pacer.clone(),
            rng: Box::new(SystemRng::from_entropy()),
            pacing: config.pacing.clone(),
            user_id: config.user_id.clone(),
        },
        view,
    );
    session.start().await;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match ChatInput::parse(&line) {
            ChatInput::Quit => break,
            ChatInput::Export(path) => {
                let export = export_session(&session);
                if let Err(e) = write_export(&export, path.map(Path::new)).await {
                    warn!(error = %e, "export failed");
                }
            }
            ChatInput::Message(text) => {
                session.submit(&SubmitMessage::new(text)).await;
            }
        }
    }

    info!(
        stage = ?session.stage(),
        relationship_depth = session.state().relationship_depth(),
        "chat ended"
    );
    Ok(())
}

/// Plays the journey, reading one answer per scene. End of input counts as
/// a blank answer.
///
/// # Errors
///
/// Returns `AppError::Bridge` if the content has no journey, or
/// `AppError::Io` if reading input fails.
pub async fn run_journey<R>(
    config: &AppConfig,
    input: R,
    view: Box<dyn TranscriptView>,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
{
    let mut journey = Journey::new(
        JourneyDeps {
            content: config.content.clone(),
            store: config.store.clone(),
            clock: config.clock.clone(),
            pacer: config.pacer.clone(),
            pacing: config.pacing.clone(),
        },
        view,
    )?;

    let mut lines = input.lines();
    journey.intro().await;
    while journey.next_scene().await.is_some() {
        let answer = lines.next_line().await?.unwrap_or_default();
        journey.answer(&AnswerQuestion::new(answer)).await;
    }
    journey.outro().await;
    Ok(())
}

/// Exports the persisted session without starting one.
///
/// # Errors
///
/// Returns `AppError::Bridge` if the stored state cannot be read or decoded,
/// or `AppError::Io` if the output cannot be written.
pub async fn run_export(config: &AppConfig, output: Option<&Path>) -> Result<(), AppError> {
    let export = export_persisted(config.store.as_ref(), config.clock.as_ref()).await?;
    write_export(&export, output).await
}

/// Forgets the persisted session and saved reflections.
///
/// # Errors
///
/// Returns `AppError::Bridge` if the store rejects a removal.
pub async fn run_reset(config: &AppConfig) -> Result<(), AppError> {
    SessionPersistence::new(config.store.clone()).clear().await?;
    clear_reflections(config.store.as_ref()).await?;
    info!("persisted session and reflections cleared");
    Ok(())
}
