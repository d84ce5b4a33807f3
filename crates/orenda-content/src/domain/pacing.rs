//! Pacing tuning: depth tiers, reveal delays, pauses and timeouts.
//!
//! Every constant here is a tuning knob of the prototype. Defaults match the
//! values it shipped with; a pacing file may override any subset.

use std::time::Duration;

use orenda_core::error::BridgeError;
use serde::{Deserialize, Serialize};

/// An inclusive range of milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Lower bound.
    pub min_ms: u32,
    /// Upper bound.
    pub max_ms: u32,
}

impl DelayRange {
    /// A range that always yields zero.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a range.
    #[must_use]
    pub const fn new(min_ms: u32, max_ms: u32) -> Self {
        Self { min_ms, max_ms }
    }

    fn validate(&self, name: &str) -> Result<(), BridgeError> {
        if self.min_ms > self.max_ms {
            return Err(BridgeError::Config(format!(
                "{name}: min_ms {} exceeds max_ms {}",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}

/// Relationship-depth tier, widening delays as depth grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthTier {
    /// Early exchanges.
    GettingToKnow,
    /// Rapport is forming.
    BuildingRapport,
    /// Established relationship.
    Deep,
}

impl DepthTier {
    /// Human-readable label sent to the reflection provider.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::GettingToKnow => "getting to know",
            Self::BuildingRapport => "building rapport",
            Self::Deep => "deep connection",
        }
    }
}

/// Depth thresholds separating the three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthThresholds {
    /// Depths up to and including this value are `GettingToKnow`.
    pub rapport_after: u32,
    /// Depths up to and including this value are `BuildingRapport`.
    pub deep_after: u32,
}

impl Default for DepthThresholds {
    fn default() -> Self {
        Self {
            rapport_after: 5,
            deep_after: 15,
        }
    }
}

impl DepthThresholds {
    /// Classifies a relationship depth.
    #[must_use]
    pub fn tier_for(&self, depth: u32) -> DepthTier {
        if depth <= self.rapport_after {
            DepthTier::GettingToKnow
        } else if depth <= self.deep_after {
            DepthTier::BuildingRapport
        } else {
            DepthTier::Deep
        }
    }
}

/// Per-character reveal delay for each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierDelays {
    /// Delay range while getting to know.
    pub getting_to_know: DelayRange,
    /// Delay range while building rapport.
    pub building_rapport: DelayRange,
    /// Delay range once deep.
    pub deep: DelayRange,
}

impl Default for TierDelays {
    fn default() -> Self {
        Self {
            getting_to_know: DelayRange::new(22, 40),
            building_rapport: DelayRange::new(30, 55),
            deep: DelayRange::new(40, 75),
        }
    }
}

impl TierDelays {
    /// Delay range for a tier.
    #[must_use]
    pub fn for_tier(&self, tier: DepthTier) -> DelayRange {
        match tier {
            DepthTier::GettingToKnow => self.getting_to_know,
            DepthTier::BuildingRapport => self.building_rapport,
            DepthTier::Deep => self.deep,
        }
    }
}

/// All pacing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Depth tier thresholds.
    pub depth: DepthThresholds,
    /// Per-character reveal delays.
    pub char_delay: TierDelays,
    /// Probability that a punctuation mark adds a pause.
    pub punctuation_probability: f64,
    /// Extra pause after punctuation.
    pub punctuation_pause: DelayRange,
    /// Probability that the midpoint character adds a pause.
    pub midpoint_probability: f64,
    /// Extra pause at the midpoint.
    pub midpoint_pause: DelayRange,
    /// Pause between scripted segments while the indicator shows.
    pub segment_pause: DelayRange,
    /// Pause at the end of a turn before input is re-enabled.
    pub turn_pause: DelayRange,
    /// How many recent transcript entries accompany a reflection request.
    pub history_window: usize,
    /// Caller-side timeout for a reflection request.
    pub request_timeout_ms: u64,
    /// Timeout for the startup warm-up call.
    pub warm_up_timeout_ms: u64,
    /// Pause after each journey line.
    pub journey_line_pause_ms: u64,
    /// Pause after each journey scene.
    pub journey_scene_pause_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            depth: DepthThresholds::default(),
            char_delay: TierDelays::default(),
            punctuation_probability: 0.65,
            punctuation_pause: DelayRange::new(250, 700),
            midpoint_probability: 0.3,
            midpoint_pause: DelayRange::new(700, 1400),
            segment_pause: DelayRange::new(1500, 3000),
            turn_pause: DelayRange::new(600, 1200),
            history_window: 6,
            request_timeout_ms: 20_000,
            warm_up_timeout_ms: 8_000,
            journey_line_pause_ms: 2_000,
            journey_scene_pause_ms: 1_500,
        }
    }
}

impl PacingConfig {
    /// A profile with every delay set to zero. Timeouts are kept.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            char_delay: TierDelays {
                getting_to_know: DelayRange::ZERO,
                building_rapport: DelayRange::ZERO,
                deep: DelayRange::ZERO,
            },
            punctuation_pause: DelayRange::ZERO,
            midpoint_pause: DelayRange::ZERO,
            segment_pause: DelayRange::ZERO,
            turn_pause: DelayRange::ZERO,
            journey_line_pause_ms: 0,
            journey_scene_pause_ms: 0,
            ..Self::default()
        }
    }

    /// Timeout applied to each reflection request.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Timeout applied to the warm-up call.
    #[must_use]
    pub fn warm_up_timeout(&self) -> Duration {
        Duration::from_millis(self.warm_up_timeout_ms)
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` describing the first inconsistency found.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.depth.rapport_after >= self.depth.deep_after {
            return Err(BridgeError::Config(format!(
                "depth.rapport_after {} must be below depth.deep_after {}",
                self.depth.rapport_after, self.depth.deep_after
            )));
        }
        for (name, p) in [
            ("punctuation_probability", self.punctuation_probability),
            ("midpoint_probability", self.midpoint_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(BridgeError::Config(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        self.char_delay.getting_to_know.validate("char_delay.getting_to_know")?;
        self.char_delay.building_rapport.validate("char_delay.building_rapport")?;
        self.char_delay.deep.validate("char_delay.deep")?;
        self.punctuation_pause.validate("punctuation_pause")?;
        self.midpoint_pause.validate("midpoint_pause")?;
        self.segment_pause.validate("segment_pause")?;
        self.turn_pause.validate("turn_pause")?;
        if self.request_timeout_ms == 0 || self.warm_up_timeout_ms == 0 {
            return Err(BridgeError::Config("timeouts must be non-zero".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let thresholds = DepthThresholds::default();

        assert_eq!(thresholds.tier_for(0), DepthTier::GettingToKnow);
        assert_eq!(thresholds.tier_for(5), DepthTier::GettingToKnow);
        assert_eq!(thresholds.tier_for(6), DepthTier::BuildingRapport);
        assert_eq!(thresholds.tier_for(15), DepthTier::BuildingRapport);
        assert_eq!(thresholds.tier_for(16), DepthTier::Deep);
    }

    #[test]
    fn test_tier_delays_widen_with_depth() {
        let delays = TierDelays::default();

        assert!(delays.building_rapport.max_ms > delays.getting_to_know.max_ms);
        assert!(delays.deep.max_ms > delays.building_rapport.max_ms);
    }

    #[test]
    fn test_default_and_instant_profiles_validate() {
        assert!(PacingConfig::default().validate().is_ok());
        assert!(PacingConfig::instant().validate().is_ok());
        assert_eq!(PacingConfig::instant().segment_pause, DelayRange::ZERO);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = PacingConfig {
            turn_pause: DelayRange::new(900, 100),
            ..PacingConfig::default()
        };

        match config.validate() {
            Err(BridgeError::Config(msg)) => assert!(msg.starts_with("turn_pause")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_probability_out_of_range() {
        let config = PacingConfig {
            midpoint_probability: 1.5,
            ..PacingConfig::default()
        };

        assert!(matches!(config.validate(), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_overlapping_thresholds() {
        let config = PacingConfig {
            depth: DepthThresholds {
                rapport_after: 10,
                deep_after: 10,
            },
            ..PacingConfig::default()
        };

        assert!(matches!(config.validate(), Err(BridgeError::Config(_))));
    }
}
