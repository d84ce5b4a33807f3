//! Turn handlers for a running conversation.
//!
//! A [`Session`] owns the conversation state and every collaborator it
//! needs. Each accepted user action is one turn: input is disabled, the
//! handler for the current stage runs to completion, depth grows by one,
//! state is persisted and input comes back after the turn pause.

use std::sync::Arc;

use orenda_content::domain::bundle::ContentBundle;
use orenda_content::domain::pacing::{DepthTier, PacingConfig};
use orenda_content::domain::topics::{Topic, TopicId};
use orenda_core::clock::{Clock, Pacer};
use orenda_core::command::Command;
use orenda_core::provider::{ReflectionProvider, ReflectionRequest, Role, Stance};
use orenda_core::rng::DeterministicRng;
use orenda_core::store::KeyValueStore;
use orenda_core::view::TranscriptView;
use tracing::{debug, info, instrument, warn};

use super::pacing::Delivery;
use super::persistence::SessionPersistence;
use crate::domain::commands::{ChooseReply, SubmitMessage};
use crate::domain::detector::{self, InputKind};
use crate::domain::state::{ConversationState, LogEntry, Stage, TopicAdvance};

/// Everything a session needs, supplied by the caller.
pub struct SessionDeps {
    /// Validated content bundle.
    pub content: Arc<ContentBundle>,
    /// Reflection provider.
    pub provider: Arc<dyn ReflectionProvider>,
    /// Key-value store for persistence.
    pub store: Arc<dyn KeyValueStore>,
    /// Source of timestamps.
    pub clock: Arc<dyn Clock>,
    /// Source of delays.
    pub pacer: Arc<dyn Pacer>,
    /// Randomness for pacing.
    pub rng: Box<dyn DeterministicRng>,
    /// Pacing tuning.
    pub pacing: PacingConfig,
    /// Optional user identifier forwarded to the provider.
    pub user_id: Option<String>,
}

/// What happened to a submitted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Not a turn: empty input, or a choice outside `Intro`.
    Ignored,
    /// Still at `Intro`; the choices were presented again.
    AwaitingChoice,
    /// A turn ran to completion.
    Completed {
        /// Stage after the turn.
        stage: Stage,
        /// Depth after the turn.
        relationship_depth: u32,
    },
}

/// A running conversation.
pub struct Session {
    state: ConversationState,
    content: Arc<ContentBundle>,
    provider: Arc<dyn ReflectionProvider>,
    persistence: SessionPersistence,
    clock: Arc<dyn Clock>,
    delivery: Delivery,
    view: Box<dyn TranscriptView>,
    user_id: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session at `Intro`. Nothing is rendered until
    /// [`Session::start`].
    #[must_use]
    pub fn new(deps: SessionDeps, view: Box<dyn TranscriptView>) -> Self {
        let state = ConversationState::new(deps.content.probe_sequence.initial.clone());
        Self {
            state,
            content: deps.content,
            provider: deps.provider,
            persistence: SessionPersistence::new(deps.store),
            clock: deps.clock,
            delivery: Delivery::new(deps.pacing, deps.pacer, deps.rng),
            view,
            user_id: deps.user_id,
        }
    }

    /// The conversation state.
    #[must_use]
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Hydrates persisted state, replays any earlier transcript, warms the
    /// provider up and presents the opener.
    #[instrument(skip(self))]
    pub async fn start(&mut self) {
        self.view.set_input_enabled(false);

        let persisted = self.persistence.load().await;
        let resumed = !persisted.transcript.is_empty();
        self.state
            .hydrate(persisted.transcript, persisted.relationship_depth);
        if resumed {
            self.replay();
            self.view.notice("Welcome back.");
        }
        info!(
            relationship_depth = self.state.relationship_depth(),
            resumed, "session started"
        );

        self.warm_up().await;

        let content = Arc::clone(&self.content);
        let opener = &content.script.opener;
        for (i, line) in opener.lines.iter().enumerate() {
            if i > 0 {
                self.segment_pause().await;
            }
            let tier = self.tier();
            self.delivery
                .reveal(self.view.as_mut(), None, line, tier)
                .await;
        }
        self.present_choices();
        self.view.set_input_enabled(true);
    }

    /// Handles a reply chosen from the opener.
    #[instrument(skip(self, command), fields(correlation_id = %command.correlation_id(), command_type = command.command_type()))]
    pub async fn choose_reply(&mut self, command: &ChooseReply) -> TurnOutcome {
        if self.state.stage() != Stage::Intro {
            debug!(stage = ?self.state.stage(), "reply chosen outside intro, ignoring");
            return TurnOutcome::Ignored;
        }
        if command.index >= self.content.script.opener.replies.len() {
            self.present_choices();
            return TurnOutcome::AwaitingChoice;
        }
        self.handle_intro(command.index).await
    }

    /// Handles free text typed by the user.
    #[instrument(skip(self, command), fields(correlation_id = %command.correlation_id(), command_type = command.command_type()))]
    pub async fn submit(&mut self, command: &SubmitMessage) -> TurnOutcome {
        let text = command.text.trim();
        if text.is_empty() {
            return TurnOutcome::Ignored;
        }

        let stage = self.state.stage();
        if stage != Stage::Intro {
            self.accept_user_text(text);
        }
        match stage {
            Stage::Intro => return self.handle_intro_text(text).await,
            Stage::GatheringInput => self.handle_gathering(text).await,
            Stage::TopicProbing => self.handle_probing(text).await,
            Stage::Wrap => self.handle_wrap().await,
        }
        self.finish_turn().await
    }

    /// Echoes and logs free text that starts a turn.
    fn accept_user_text(&mut self, text: &str) {
        self.view.set_input_enabled(false);
        self.view.user_message(text);
        let topic = self.state.current_topic().cloned();
        self.log(Role::User, text, topic);
    }

    /// Text typed at `Intro` only counts when it names one of the replies.
    async fn handle_intro_text(&mut self, text: &str) -> TurnOutcome {
        match self.content.script.opener.resolve_reply(text) {
            Some(index) => self.handle_intro(index).await,
            None => {
                self.present_choices();
                TurnOutcome::AwaitingChoice
            }
        }
    }

    async fn handle_intro(&mut self, index: usize) -> TurnOutcome {
        let content = Arc::clone(&self.content);
        let opener = &content.script.opener;
        let Some(reply) = opener.replies.get(index) else {
            self.present_choices();
            return TurnOutcome::AwaitingChoice;
        };

        self.view.set_input_enabled(false);
        self.view.user_message(&reply.label);
        for line in &opener.lines {
            self.log(Role::Agent, line, None);
        }
        self.log(Role::User, &reply.label, None);
        self.speak(&reply.response, None).await;
        self.state.enter_gathering();
        self.finish_turn().await
    }

    async fn handle_gathering(&mut self, text: &str) {
        match detector::classify(text) {
            InputKind::BirthData(data) => {
                info!(
                    has_date = data.date.is_some(),
                    has_time = data.time.is_some(),
                    has_place = data.place.is_some(),
                    "birth details recognized"
                );
                self.state.record_birth_data(data);
                let acknowledgement = self.content.script.gathering.acknowledgement.clone();
                self.speak(&acknowledgement, None).await;
                self.state.begin_probing();
                self.segment_pause().await;
                self.open_current_topic(text).await;
            }
            InputKind::Conversational => {
                let request = self.request(Stance::Steer, text, None);
                let fallback = self.content.script.gathering.steer_fallback.clone();
                let line = self.reflect_or(request, fallback).await;
                self.speak(&line, None).await;
            }
        }
    }

    async fn handle_probing(&mut self, text: &str) {
        let Some(id) = self.state.current_topic().cloned() else {
            return;
        };
        let content = Arc::clone(&self.content);
        if let Some(topic) = content.topic(&id) {
            let request = self.request(Stance::FollowUp, text, Some(topic));
            let line = self.reflect_or(request, topic.follow_up_fallback()).await;
            self.speak(&line, Some(id)).await;
        }

        match self.state.advance_topic(&content.probe_sequence.extension) {
            TopicAdvance::Next(next) => {
                debug!(topic = %next, "advancing to next topic");
                self.segment_pause().await;
                self.open_current_topic(text).await;
            }
            TopicAdvance::Exhausted => {
                info!("all topics probed, closing");
                self.segment_pause().await;
                self.close().await;
            }
        }
    }

    async fn handle_wrap(&mut self) {
        let remark = self.content.script.closing.remark.clone();
        self.speak(&remark, None).await;
    }

    async fn open_current_topic(&mut self, user_message: &str) {
        let Some(id) = self.state.current_topic().cloned() else {
            return;
        };
        let content = Arc::clone(&self.content);
        let Some(topic) = content.topic(&id) else {
            warn!(topic = %id, "probe sequence names an unknown topic");
            return;
        };
        let request = self.request(Stance::Opening, user_message, Some(topic));
        let line = self.reflect_or(request, topic.opening_fallback()).await;
        self.speak(&line, Some(id)).await;
    }

    async fn close(&mut self) {
        let content = Arc::clone(&self.content);
        for (i, line) in content.script.closing.lines.iter().enumerate() {
            if i > 0 {
                self.segment_pause().await;
            }
            self.speak(line, None).await;
        }
    }

    fn request(&self, stance: Stance, user_message: &str, topic: Option<&Topic>) -> ReflectionRequest {
        let depth = self.state.relationship_depth();
        ReflectionRequest {
            user_message: user_message.to_owned(),
            topic: topic.map(Topic::context),
            stance,
            relationship_depth: depth,
            depth_level: self.tier().label().to_owned(),
            history: self.state.history(self.delivery.config().history_window),
            user_id: self.user_id.clone(),
        }
    }

    /// Asks the provider for a line, substituting `fallback` on error,
    /// timeout, `success: false` or an empty response.
    async fn reflect_or(&mut self, request: ReflectionRequest, fallback: String) -> String {
        let timeout = self.delivery.config().request_timeout();
        self.view.show_indicator(None);
        let outcome = tokio::time::timeout(timeout, self.provider.reflect(&request)).await;
        self.view.clear_indicator();

        let stance = request.stance.as_str();
        match outcome {
            Ok(Ok(result)) => {
                if let Some(text) = result.usable_text() {
                    return text.to_owned();
                }
                warn!(stance, success = result.success, "provider returned no usable text, using fallback");
            }
            Ok(Err(e)) => warn!(stance, error = %e, "provider call failed, using fallback"),
            Err(_) => warn!(
                stance,
                timeout_ms = self.delivery.config().request_timeout_ms,
                "provider call timed out, using fallback"
            ),
        }
        fallback
    }

    async fn warm_up(&self) {
        let timeout = self.delivery.config().warm_up_timeout();
        match tokio::time::timeout(timeout, self.provider.warm_up()).await {
            Ok(Ok(())) => debug!("provider warmed up"),
            Ok(Err(e)) => debug!(error = %e, "provider warm-up failed"),
            Err(_) => debug!("provider warm-up timed out"),
        }
    }

    /// Reveals an agent line and appends it to the transcript.
    async fn speak(&mut self, text: &str, topic: Option<TopicId>) {
        let tier = self.tier();
        let speaker = topic
            .as_ref()
            .map(|id| self.content.display_name(id).to_owned());
        self.delivery
            .reveal(self.view.as_mut(), speaker.as_deref(), text, tier)
            .await;
        self.log(Role::Agent, text, topic);
    }

    fn log(&mut self, role: Role, text: &str, topic: Option<TopicId>) {
        let entry = LogEntry {
            role,
            text: text.to_owned(),
            topic,
            timestamp: self.clock.now(),
        };
        self.state.append(entry);
    }

    async fn segment_pause(&mut self) {
        let content = Arc::clone(&self.content);
        self.delivery
            .segment_pause(self.view.as_mut(), &content.script.breathing_prompts)
            .await;
    }

    async fn finish_turn(&mut self) -> TurnOutcome {
        let relationship_depth = self.state.complete_exchange();
        self.persistence.save(&self.state).await;
        self.delivery.turn_pause().await;
        self.view.set_input_enabled(true);

        let stage = self.state.stage();
        info!(?stage, relationship_depth, "turn completed");
        TurnOutcome::Completed {
            stage,
            relationship_depth,
        }
    }

    fn present_choices(&mut self) {
        let labels: Vec<String> = self
            .content
            .script
            .opener
            .replies
            .iter()
            .map(|r| r.label.clone())
            .collect();
        self.view.show_choices(&labels);
    }

    /// Renders a resumed transcript without pacing.
    fn replay(&mut self) {
        for entry in self.state.transcript() {
            match entry.role {
                Role::User => self.view.user_message(&entry.text),
                Role::Agent => {
                    let speaker = entry
                        .topic
                        .as_ref()
                        .map(|id| self.content.display_name(id));
                    Delivery::present(self.view.as_mut(), speaker, &entry.text);
                }
            }
        }
    }

    fn tier(&self) -> DepthTier {
        self.delivery
            .config()
            .depth
            .tier_for(self.state.relationship_depth())
    }
}
