//! Confidence scoring
//!
//! Combines record-validation outcomes into a bimodal confidence score:
//! `0.0` (reject) or a value in `[floor, floor + span]` (accept).
//!
//! # Aggregation
//! Each call runs `LINK_GATE → ITEM_SCORING` and terminates in either
//! `REJECTED(0.0)` or `ACCEPTED(score)`. There are no retries and no state
//! kept between calls.
//!
//! 1. **Link gate** - every URL / image URL in the response must be valid,
//!    otherwise the whole response is rejected
//! 2. **Item scoring** - per-section validity ratio rescaled by [`ScoringPolicy`]

pub mod aggregator;
pub mod composite;
pub mod link_gate;

pub use aggregator::ConfidenceAggregator;

use kortek_common::config::ScoringConfig;

/// Score given to a singleton document that fully validates
pub const FULL_CONFIDENCE: f64 = 1.0;

/// Rescaling of an item-level validity ratio into a confidence score
///
/// `score = round2(max(floor, floor + span * ratio))`, `0.0` when nothing is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub floor: f64,
    pub span: f64,
}

impl ScoringPolicy {
    pub fn new(floor: f64, span: f64) -> Self {
        Self { floor, span }
    }

    /// Score `valid` accepted items out of `total` inputs
    pub fn score(&self, valid: usize, total: usize) -> f64 {
        if valid == 0 || total == 0 {
            return 0.0;
        }
        self.rescale(valid as f64 / total as f64)
    }

    /// Rescale a ratio in `[0, 1]` into `[floor, floor + span]`
    pub fn rescale(&self, ratio: f64) -> f64 {
        round2(self.floor.max(self.floor + self.span * ratio))
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringConfig::default().into()
    }
}

impl From<ScoringConfig> for ScoringPolicy {
    fn from(config: ScoringConfig) -> Self {
        Self::new(config.floor, config.span)
    }
}

/// Round to two decimal places
///
/// Rounds the exact decimal expansion of `value`, so `0.865` (stored as
/// `0.86499...`) becomes `0.86`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Valid/total counts for one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub valid: usize,
    pub total: usize,
}

impl Tally {
    pub fn add(&mut self, other: Tally) {
        self.valid += other.valid;
        self.total += other.total;
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }
}
