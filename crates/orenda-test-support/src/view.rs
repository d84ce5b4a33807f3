//! Recording transcript view.

use std::sync::{Arc, Mutex};

use orenda_core::view::TranscriptView;

/// Something the code under test asked the view to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A full user message.
    User(String),
    /// A completed agent message with its optional speaker.
    Agent {
        /// Speaker label, if any.
        speaker: Option<String>,
        /// Fully revealed text.
        text: String,
    },
    /// Selectable replies.
    Choices(Vec<String>),
    /// Indicator shown, with its optional breathing prompt.
    Indicator(Option<String>),
    /// Indicator hidden.
    IndicatorCleared,
    /// Input toggled.
    Input(bool),
    /// Out-of-band notice.
    Notice(String),
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<ViewEvent>,
    pending: Option<(Option<String>, String)>,
    revealed_chars: usize,
}

/// A view that records what it is asked to render. Streamed agent text is
/// assembled into a single `ViewEvent::Agent` when the message ends. Clones
/// share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingView {
    /// Creates an empty recording view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<ViewEvent> {
        self.inner.lock().unwrap().events.clone()
    }

    /// Returns the text of every completed agent message, in order.
    #[must_use]
    pub fn agent_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Agent { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Returns the total number of characters revealed one at a time.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn revealed_chars(&self) -> usize {
        self.inner.lock().unwrap().revealed_chars
    }

    /// Returns the most recent input toggle, if any.
    #[must_use]
    pub fn input_enabled(&self) -> Option<bool> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Input(enabled) => Some(enabled),
            _ => None,
        })
    }
}

impl TranscriptView for RecordingView {
    fn user_message(&mut self, text: &str) {
        self.inner
            .lock()
            .unwrap()
            .events
            .push(ViewEvent::User(text.to_owned()));
    }

    fn begin_agent_message(&mut self, speaker: Option<&str>) {
        self.inner.lock().unwrap().pending = Some((speaker.map(str::to_owned), String::new()));
    }

    fn push_agent_char(&mut self, c: char) {
        let mut inner = self.inner.lock().unwrap();
        inner.revealed_chars += 1;
        if let Some((_, text)) = inner.pending.as_mut() {
            text.push(c);
        }
    }

    fn end_agent_message(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        if let Some((speaker, text)) = inner.pending.take() {
            inner.events.push(ViewEvent::Agent { speaker, text });
        }
    }

    fn show_choices(&mut self, choices: &[String]) {
        self.inner
            .lock()
            .unwrap()
            .events
            .push(ViewEvent::Choices(choices.to_vec()));
    }

    fn show_indicator(&mut self, prompt: Option<&str>) {
        self.inner
            .lock()
            .unwrap()
            .events
            .push(ViewEvent::Indicator(prompt.map(str::to_owned)));
    }

    fn clear_indicator(&mut self) {
        self.inner
            .lock()
            .unwrap()
            .events
            .push(ViewEvent::IndicatorCleared);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.inner
            .lock()
            .unwrap()
            .events
            .push(ViewEvent::Input(enabled));
    }

    fn notice(&mut self, text: &str) {
        self.inner
            .lock()
            .unwrap()
            .events
            .push(ViewEvent::Notice(text.to_owned()));
    }
}
