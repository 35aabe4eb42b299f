//! Composite wellness score
//!
//! Combines the four raw metrics into a single bounded 0-100 score via
//! weighted, clamped normalization, then classifies it into a status tier.
//! Mood and sleep carry the heaviest, equal weights; volume and consistency
//! are secondary signals whose credit is capped once a sufficiency threshold
//! is reached, so that overtraining or streak gaming cannot run the score up.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricSnapshot;

/// Weight of the mood term (mean mood on its 1-5 scale)
pub const MOOD_WEIGHT: f64 = 35.0;
/// Weight of the sleep term, full credit at 8 hours
pub const SLEEP_WEIGHT: f64 = 35.0;
/// Weight of the volume term, full credit at 600 minutes
pub const MINUTES_WEIGHT: f64 = 20.0;
/// Weight of the consistency term, full credit at a 10-day streak
pub const STREAK_WEIGHT: f64 = 10.0;

/// Sleep hours granting full sleep credit
pub const SLEEP_TARGET_HOURS: f64 = 8.0;
/// Active minutes granting full volume credit
pub const MINUTES_TARGET: f64 = 600.0;
/// Streak length granting full consistency credit
pub const STREAK_TARGET_DAYS: f64 = 10.0;

/// Status tier for a composite score, first matching threshold descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Excellence,
    VerySatisfactory,
    Satisfactory,
    NeedsReinforcement,
    RecoveryPriority,
}

impl ScoreStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => ScoreStatus::Excellence,
            70.. => ScoreStatus::VerySatisfactory,
            55.. => ScoreStatus::Satisfactory,
            40.. => ScoreStatus::NeedsReinforcement,
            _ => ScoreStatus::RecoveryPriority,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreStatus::Excellence => "Excellence",
            ScoreStatus::VerySatisfactory => "Very satisfactory",
            ScoreStatus::Satisfactory => "Satisfactory",
            ScoreStatus::NeedsReinforcement => "Needs reinforcement",
            ScoreStatus::RecoveryPriority => "Recovery priority",
        }
    }
}

/// Composite 0-100 score plus its status tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub value: u8,
    pub status: ScoreStatus,
}

/// Compute the composite score for one snapshot.
///
/// The weights sum to 100 and each term is individually bounded, so the sum
/// already lies in [0, 100] for non-negative inputs; no further clamp is
/// applied after rounding.
pub fn compute_score(snapshot: &MetricSnapshot) -> Score {
    let mood_term = (snapshot.mean_mood / 5.0) * MOOD_WEIGHT;
    let sleep_term = clamp01(snapshot.mean_sleep_hours / SLEEP_TARGET_HOURS) * SLEEP_WEIGHT;
    let minutes_term = clamp01(f64::from(snapshot.total_minutes) / MINUTES_TARGET) * MINUTES_WEIGHT;
    let streak_term = clamp01(f64::from(snapshot.streak_days) / STREAK_TARGET_DAYS) * STREAK_WEIGHT;

    let value = (mood_term + sleep_term + minutes_term + streak_term).round() as u8;

    Score {
        value,
        status: ScoreStatus::from_score(value),
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
