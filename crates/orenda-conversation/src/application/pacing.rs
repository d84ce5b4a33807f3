//! Timed delivery of agent lines.
//!
//! Agent text is revealed one character at a time. Each character waits a
//! delay drawn from the current depth tier's range; punctuation and the
//! midpoint character may add a longer pause. Between segments an indicator
//! is shown while a randomized pause elapses.

use std::sync::Arc;
use std::time::Duration;

use orenda_content::domain::pacing::{DelayRange, DepthTier, PacingConfig};
use orenda_core::clock::Pacer;
use orenda_core::rng::DeterministicRng;
use orenda_core::view::TranscriptView;

/// Characters that may trigger a reflective pause.
fn is_pause_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '…' | '—')
}

/// Paces agent output through a [`Pacer`].
pub struct Delivery {
    config: PacingConfig,
    pacer: Arc<dyn Pacer>,
    rng: Box<dyn DeterministicRng>,
}

impl std::fmt::Debug for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delivery")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Delivery {
    /// Creates a delivery with the given tuning, pacer and randomness.
    #[must_use]
    pub fn new(config: PacingConfig, pacer: Arc<dyn Pacer>, rng: Box<dyn DeterministicRng>) -> Self {
        Self { config, pacer, rng }
    }

    /// The tuning in effect.
    #[must_use]
    pub fn config(&self) -> &PacingConfig {
        &self.config
    }

    /// Draws a duration from `range`.
    pub fn pick(&mut self, range: DelayRange) -> Duration {
        let ms = self.rng.next_u32_range(range.min_ms, range.max_ms);
        Duration::from_millis(u64::from(ms))
    }

    /// Delay before revealing the character at `index` of a `len`-character
    /// message.
    fn char_delay(&mut self, c: char, index: usize, len: usize, tier: DepthTier) -> Duration {
        let mut delay = self.pick(self.config.char_delay.for_tier(tier));
        if is_pause_punctuation(c) && self.rng.chance(self.config.punctuation_probability) {
            delay += self.pick(self.config.punctuation_pause);
        }
        if len > 1 && index == len / 2 && self.rng.chance(self.config.midpoint_probability) {
            delay += self.pick(self.config.midpoint_pause);
        }
        delay
    }

    /// Reveals `text` character by character.
    pub async fn reveal(
        &mut self,
        view: &mut dyn TranscriptView,
        speaker: Option<&str>,
        text: &str,
        tier: DepthTier,
    ) {
        let len = text.chars().count();
        view.begin_agent_message(speaker);
        for (index, c) in text.chars().enumerate() {
            view.push_agent_char(c);
            let delay = self.char_delay(c, index, len, tier);
            self.pacer.pause(delay).await;
        }
        view.end_agent_message();
    }

    /// Shows `text` in one piece, without per-character pacing.
    pub fn present(view: &mut dyn TranscriptView, speaker: Option<&str>, text: &str) {
        view.begin_agent_message(speaker);
        for c in text.chars() {
            view.push_agent_char(c);
        }
        view.end_agent_message();
    }

    /// Pauses between segments with the indicator up, showing one of
    /// `prompts` at random when any are configured.
    pub async fn segment_pause(&mut self, view: &mut dyn TranscriptView, prompts: &[String]) {
        let prompt = match prompts.len() {
            0 => None,
            n => {
                let last = u32::try_from(n - 1).unwrap_or(u32::MAX);
                let pick = usize::try_from(self.rng.next_u32_range(0, last)).unwrap_or(0);
                prompts.get(pick.min(n - 1)).map(String::as_str)
            }
        };
        view.show_indicator(prompt);
        let delay = self.pick(self.config.segment_pause);
        self.pacer.pause(delay).await;
        view.clear_indicator();
    }

    /// The pause closing a turn, before input comes back.
    pub async fn turn_pause(&mut self) {
        let delay = self.pick(self.config.turn_pause);
        self.pacer.pause(delay).await;
    }

    /// A fixed pause of `ms` milliseconds.
    pub async fn pause_ms(&self, ms: u64) {
        self.pacer.pause(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use orenda_test_support::{MockRng, RecordingPacer, RecordingView, SequenceRng, ViewEvent};

    use super::*;

    fn fixed_config() -> PacingConfig {
        let mut config = PacingConfig::default();
        config.char_delay.getting_to_know = DelayRange::new(10, 10);
        config.char_delay.deep = DelayRange::new(50, 50);
        config.punctuation_pause = DelayRange::new(300, 300);
        config.midpoint_pause = DelayRange::new(1000, 1000);
        config
    }

    #[tokio::test]
    async fn test_reveal_streams_every_character() {
        // Arrange
        let pacer = RecordingPacer::new();
        let mut view = RecordingView::new();
        let mut delivery = Delivery::new(
            PacingConfig::instant(),
            Arc::new(pacer.clone()),
            Box::new(MockRng),
        );

        // Act
        delivery
            .reveal(&mut view, Some("The Fourth House"), "Hello", DepthTier::GettingToKnow)
            .await;

        // Assert
        assert_eq!(view.revealed_chars(), 5);
        assert_eq!(pacer.pauses().len(), 5);
        assert_eq!(
            view.events(),
            vec![ViewEvent::Agent {
                speaker: Some("The Fourth House".to_owned()),
                text: "Hello".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn test_punctuation_and_midpoint_add_pauses_when_chance_hits() {
        // MockRng returns 0.0 for every fraction, so every chance succeeds.
        let pacer = RecordingPacer::new();
        let mut view = RecordingView::new();
        let mut delivery = Delivery::new(fixed_config(), Arc::new(pacer.clone()), Box::new(MockRng));

        delivery
            .reveal(&mut view, None, "ab.", DepthTier::GettingToKnow)
            .await;

        // 'a' = base, 'b' = base + midpoint (index 1 of 3), '.' = base + punctuation.
        assert_eq!(
            pacer.pauses(),
            vec![
                Duration::from_millis(10),
                Duration::from_millis(1010),
                Duration::from_millis(310),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_extra_pauses_when_chance_misses() {
        let pacer = RecordingPacer::new();
        let mut view = RecordingView::new();
        let rng = SequenceRng::new(vec![50]).with_fractions(vec![0.99]);
        let mut delivery = Delivery::new(fixed_config(), Arc::new(pacer.clone()), Box::new(rng));

        delivery.reveal(&mut view, None, "a, b.", DepthTier::Deep).await;

        assert!(pacer.pauses().iter().all(|d| *d == Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_deeper_tier_reveals_more_slowly() {
        let shallow = RecordingPacer::new();
        let deep = RecordingPacer::new();
        let mut view = RecordingView::new();
        let config = {
            let mut c = fixed_config();
            c.punctuation_probability = 0.0;
            c.midpoint_probability = 0.0;
            c
        };

        Delivery::new(config.clone(), Arc::new(shallow.clone()), Box::new(MockRng))
            .reveal(&mut view, None, "same text", DepthTier::GettingToKnow)
            .await;
        Delivery::new(config, Arc::new(deep.clone()), Box::new(MockRng))
            .reveal(&mut view, None, "same text", DepthTier::Deep)
            .await;

        assert!(deep.total() > shallow.total());
    }

    #[tokio::test]
    async fn test_segment_pause_shows_a_breathing_prompt() {
        let pacer = RecordingPacer::new();
        let mut view = RecordingView::new();
        let prompts = vec!["breathe in...".to_owned(), "let that settle...".to_owned()];
        let mut delivery = Delivery::new(
            PacingConfig::default(),
            Arc::new(pacer.clone()),
            Box::new(SequenceRng::new(vec![1, 2000])),
        );

        delivery.segment_pause(&mut view, &prompts).await;

        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Indicator(Some("let that settle...".to_owned())),
                ViewEvent::IndicatorCleared,
            ]
        );
        assert_eq!(pacer.pauses(), vec![Duration::from_millis(2000)]);
    }

    #[tokio::test]
    async fn test_segment_pause_without_prompts_shows_bare_indicator() {
        let pacer = RecordingPacer::new();
        let mut view = RecordingView::new();
        let mut delivery = Delivery::new(PacingConfig::default(), Arc::new(pacer), Box::new(MockRng));

        delivery.segment_pause(&mut view, &[]).await;

        assert_eq!(view.events()[0], ViewEvent::Indicator(None));
    }
}
