//! The journey player.
//!
//! Lines are shown whole, each followed by a fixed pause. After a scene the
//! player waits for the user's answer to its question before moving on.

use std::sync::Arc;
use std::time::Duration;

use orenda_content::domain::bundle::ContentBundle;
use orenda_content::domain::journey::{JourneyScript, Scene};
use orenda_content::domain::pacing::PacingConfig;
use orenda_content::domain::topics::TopicId;
use orenda_conversation::application::pacing::Delivery;
use orenda_core::clock::{Clock, Pacer};
use orenda_core::command::Command;
use orenda_core::error::BridgeError;
use orenda_core::store::KeyValueStore;
use orenda_core::view::TranscriptView;
use tracing::{info, instrument, warn};

use super::query_handlers::{REFLECTIONS_KEY, load_reflections};
use crate::domain::commands::AnswerQuestion;
use crate::domain::reflection::{Reflection, scene_label};

/// Everything a journey needs, supplied by the caller.
pub struct JourneyDeps {
    /// Validated content bundle; must carry a journey script.
    pub content: Arc<ContentBundle>,
    /// Store for saved reflections.
    pub store: Arc<dyn KeyValueStore>,
    /// Source of timestamps.
    pub clock: Arc<dyn Clock>,
    /// Source of delays.
    pub pacer: Arc<dyn Pacer>,
    /// Pacing tuning; only the journey pauses apply.
    pub pacing: PacingConfig,
}

/// What happened to an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The reflection was appended to the store.
    Saved,
    /// Blank answer; nothing was recorded.
    Skipped,
    /// The store rejected the write; the journey continues.
    NotSaved,
    /// No question was waiting for an answer.
    NoQuestion,
}

#[derive(Debug)]
struct PendingQuestion {
    scene: String,
    question: String,
}

/// Plays the journey script scene by scene.
pub struct Journey {
    content: Arc<ContentBundle>,
    script: JourneyScript,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    pacer: Arc<dyn Pacer>,
    pacing: PacingConfig,
    view: Box<dyn TranscriptView>,
    played: usize,
    pending: Option<PendingQuestion>,
}

impl std::fmt::Debug for Journey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journey")
            .field("played", &self.played)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Journey {
    /// Creates a player for the bundle's journey script.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` if the bundle has no journey script.
    pub fn new(deps: JourneyDeps, view: Box<dyn TranscriptView>) -> Result<Self, BridgeError> {
        let script = deps
            .content
            .journey
            .clone()
            .ok_or_else(|| BridgeError::Config("content bundle has no journey".to_owned()))?;
        Ok(Self {
            content: deps.content,
            script,
            store: deps.store,
            clock: deps.clock,
            pacer: deps.pacer,
            pacing: deps.pacing,
            view,
            played: 0,
            pending: None,
        })
    }

    /// Number of scenes this journey will play.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.script.scenes.len().min(self.script.scene_limit)
    }

    /// Welcome from the host house.
    pub async fn intro(&mut self) {
        let host = self.content.display_name(&self.script.host).to_owned();
        self.view.notice(&format!("{host} speaks:"));
        let lines = self.script.intro.clone();
        for line in &lines {
            self.line(Some(&host), line).await;
        }
        self.scene_pause().await;
    }

    /// Plays the next scene and returns its question. Returns `None` once
    /// the scene limit is reached.
    #[instrument(skip(self), fields(scene = self.played + 1))]
    pub async fn next_scene(&mut self) -> Option<String> {
        if self.played >= self.scene_count() {
            return None;
        }
        let scene: Scene = self.script.scenes[self.played].clone();
        self.played += 1;

        let (a, b) = &scene.pair;
        let header = format!(
            "{} <-> {}",
            self.content.display_name(a),
            self.content.display_name(b)
        );
        self.view.notice(&header);
        for line in &scene.lines {
            let speaker = if line.is_system() {
                None
            } else {
                let id = TopicId::new(line.speaker.as_str());
                Some(self.content.display_name(&id).to_owned())
            };
            self.line(speaker.as_deref(), &line.text).await;
        }
        self.scene_pause().await;

        let question = scene.question().map(str::to_owned);
        self.pending = question.clone().map(|question| PendingQuestion {
            scene: scene_label(&scene.pair),
            question,
        });
        if self.pending.is_some() {
            self.view.set_input_enabled(true);
        }
        question
    }

    /// Records the user's answer to the pending question.
    #[instrument(skip(self, command), fields(correlation_id = %command.correlation_id(), command_type = command.command_type()))]
    pub async fn answer(&mut self, command: &AnswerQuestion) -> AnswerOutcome {
        let Some(pending) = self.pending.take() else {
            return AnswerOutcome::NoQuestion;
        };
        self.view.set_input_enabled(false);

        let answer = command.text.trim();
        let outcome = if answer.is_empty() {
            self.view.notice("No reflection recorded.");
            AnswerOutcome::Skipped
        } else {
            self.view.user_message(answer);
            let reflection = Reflection {
                scene: pending.scene,
                question: pending.question,
                answer: answer.to_owned(),
                time: self.clock.now(),
            };
            match self.save(reflection).await {
                Ok(count) => {
                    info!(saved = count, "reflection saved");
                    self.view.notice("Thank you. Your reflection has been saved.");
                    AnswerOutcome::Saved
                }
                Err(e) => {
                    warn!(error = %e, "failed to save reflection");
                    self.view.notice("Your reflection could not be saved.");
                    AnswerOutcome::NotSaved
                }
            }
        };
        self.scene_pause().await;
        outcome
    }

    /// Closing lines.
    pub async fn outro(&mut self) {
        let lines = self.script.outro.clone();
        for line in &lines {
            self.line(None, line).await;
        }
    }

    async fn save(&self, reflection: Reflection) -> Result<usize, BridgeError> {
        let mut reflections = load_reflections(self.store.as_ref()).await?;
        reflections.push(reflection);
        let json = serde_json::to_string(&reflections)?;
        self.store.set(REFLECTIONS_KEY, &json).await?;
        Ok(reflections.len())
    }

    async fn line(&mut self, speaker: Option<&str>, text: &str) {
        Delivery::present(self.view.as_mut(), speaker, text);
        self.pacer
            .pause(Duration::from_millis(self.pacing.journey_line_pause_ms))
            .await;
    }

    async fn scene_pause(&self) {
        self.pacer
            .pause(Duration::from_millis(self.pacing.journey_scene_pause_ms))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use orenda_content::application::loader::builtin_bundle;
    use orenda_test_support::{
        FailingStore, FixedClock, InMemoryStore, RecordingPacer, RecordingView, ViewEvent,
    };

    use super::*;

    fn deps(store: Arc<dyn KeyValueStore>, pacer: RecordingPacer) -> JourneyDeps {
        JourneyDeps {
            content: Arc::new(builtin_bundle().unwrap()),
            store,
            clock: Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())),
            pacer: Arc::new(pacer),
            pacing: PacingConfig::default(),
        }
    }

    fn journey(store: Arc<dyn KeyValueStore>) -> (Journey, RecordingView, RecordingPacer) {
        let view = RecordingView::new();
        let pacer = RecordingPacer::new();
        let journey = Journey::new(deps(store, pacer.clone()), Box::new(view.clone())).unwrap();
        (journey, view, pacer)
    }

    #[tokio::test]
    async fn test_full_journey_plays_three_scenes_and_saves_answers() {
        // Arrange
        let store = InMemoryStore::new();
        let (mut journey, view, _pacer) = journey(Arc::new(store.clone()));
        let mut questions = Vec::new();

        // Act
        journey.intro().await;
        while let Some(question) = journey.next_scene().await {
            questions.push(question);
            journey.answer(&AnswerQuestion::new("something true")).await;
        }
        journey.outro().await;

        // Assert
        assert_eq!(journey.scene_count(), 3);
        assert_eq!(
            questions,
            vec![
                "When did someone else show you something about yourself?",
                "What are you holding onto right now?",
                "What from home do you bring into your work?",
            ]
        );
        let saved = load_reflections(&store).await.unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[1].scene, "second <-> eighth");
        assert_eq!(
            view.agent_lines().last().map(String::as_str),
            Some("The houses will be here when you return.")
        );
    }

    #[tokio::test]
    async fn test_intro_is_spoken_by_the_host() {
        let (mut journey, view, pacer) = journey(Arc::new(InMemoryStore::new()));

        journey.intro().await;

        let events = view.events();
        assert_eq!(events[0], ViewEvent::Notice("The Second House speaks:".to_owned()));
        assert_eq!(
            events[1],
            ViewEvent::Agent {
                speaker: Some("The Second House".to_owned()),
                text: "Welcome. I am the keeper of resources, of what you value.".to_owned(),
            }
        );
        // Four lines at 2000 ms each, then the scene pause.
        assert_eq!(pacer.total(), Duration::from_millis(4 * 2000 + 1500));
    }

    #[tokio::test]
    async fn test_scene_lines_are_attributed_and_question_is_unattributed() {
        let (mut journey, view, _pacer) = journey(Arc::new(InMemoryStore::new()));

        journey.next_scene().await;

        let events = view.events();
        assert_eq!(
            events[0],
            ViewEvent::Notice("The First House <-> The Seventh House".to_owned())
        );
        assert!(events.contains(&ViewEvent::Agent {
            speaker: Some("The Seventh House".to_owned()),
            text: "And I wait across the room, watching who you become when someone looks back."
                .to_owned(),
        }));
        assert!(events.contains(&ViewEvent::Agent {
            speaker: None,
            text: "When did someone else show you something about yourself?".to_owned(),
        }));
        assert_eq!(view.input_enabled(), Some(true));
    }

    #[tokio::test]
    async fn test_blank_answer_is_not_recorded() {
        let store = InMemoryStore::new();
        let (mut journey, view, _pacer) = journey(Arc::new(store.clone()));
        journey.next_scene().await;

        let outcome = journey.answer(&AnswerQuestion::new("   ")).await;

        assert_eq!(outcome, AnswerOutcome::Skipped);
        assert_eq!(store.raw(REFLECTIONS_KEY), None);
        assert!(view.events().contains(&ViewEvent::Notice("No reflection recorded.".to_owned())));
    }

    #[tokio::test]
    async fn test_answers_append_to_existing_reflections() {
        let existing = r#"[{"scene":"fifth <-> twelfth","question":"Q?","answer":"A.","time":"2025-12-01T08:00:00Z"}]"#;
        let store = InMemoryStore::with_entries([(REFLECTIONS_KEY, existing)]);
        let (mut journey, _view, _pacer) = journey(Arc::new(store.clone()));
        journey.next_scene().await;

        let outcome = journey.answer(&AnswerQuestion::new("  my sister  ")).await;

        assert_eq!(outcome, AnswerOutcome::Saved);
        let saved = load_reflections(&store).await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].answer, "A.");
        assert_eq!(saved[1].answer, "my sister");
        assert_eq!(saved[1].scene, "first <-> seventh");
    }

    #[tokio::test]
    async fn test_answer_without_question_and_failing_store() {
        let (mut journey, _view, _pacer) = journey(Arc::new(FailingStore));

        assert_eq!(
            journey.answer(&AnswerQuestion::new("early")).await,
            AnswerOutcome::NoQuestion
        );
        journey.next_scene().await;
        assert_eq!(
            journey.answer(&AnswerQuestion::new("kept in memory only")).await,
            AnswerOutcome::NotSaved
        );
        assert!(journey.next_scene().await.is_some());
    }

    #[test]
    fn test_bundle_without_journey_is_rejected() {
        let mut bundle = builtin_bundle().unwrap();
        bundle.journey = None;
        let deps = JourneyDeps {
            content: Arc::new(bundle),
            ..deps(Arc::new(InMemoryStore::new()), RecordingPacer::new())
        };

        assert!(matches!(
            Journey::new(deps, Box::new(RecordingView::new())),
            Err(BridgeError::Config(_))
        ));
    }
}
