//! Period-over-period comparison
//!
//! Computes signed deltas between the current and previous snapshots and
//! classifies each one. Every metric in this engine improves upward, so the
//! polarity rule is uniform: a delta of at least zero is "good" (the
//! comparison is closed, an exact zero is not neutral), anything below zero
//! deserves attention.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricSnapshot;
use crate::score::Score;

/// Qualitative classification of one delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendFlag {
    Good,
    Attention,
}

/// One signed period-over-period difference.
///
/// `formatted` carries the display contract: an explicit sign, two decimals
/// for floating metrics, none for integer metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub value: f64,
    pub flag: TrendFlag,
    pub formatted: String,
}

impl MetricDelta {
    fn new(value: f64, formatted: String) -> Self {
        let flag = if value >= 0.0 {
            TrendFlag::Good
        } else {
            TrendFlag::Attention
        };
        Self {
            value,
            flag,
            formatted,
        }
    }

    pub fn integer(value: i64) -> Self {
        Self::new(value as f64, format!("{value:+}"))
    }

    pub fn float(value: f64) -> Self {
        Self::new(value, format!("{value:+.2}"))
    }
}

/// Deltas for the four compared metrics; all `None` when no previous period
/// exists, never a fabricated zero baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaSet {
    pub total_minutes: Option<MetricDelta>,
    pub mean_mood: Option<MetricDelta>,
    pub mean_sleep_hours: Option<MetricDelta>,
    pub score: Option<MetricDelta>,
}

impl DeltaSet {
    pub fn has_previous(&self) -> bool {
        self.score.is_some()
    }
}

/// Compare the current period against the previous one, if any
pub fn compare(
    current: &MetricSnapshot,
    current_score: Score,
    previous: Option<(&MetricSnapshot, Score)>,
) -> DeltaSet {
    let Some((prev, prev_score)) = previous else {
        return DeltaSet::default();
    };

    DeltaSet {
        total_minutes: Some(MetricDelta::integer(
            i64::from(current.total_minutes) - i64::from(prev.total_minutes),
        )),
        mean_mood: Some(MetricDelta::float(current.mean_mood - prev.mean_mood)),
        mean_sleep_hours: Some(MetricDelta::float(
            current.mean_sleep_hours - prev.mean_sleep_hours,
        )),
        score: Some(MetricDelta::integer(
            i64::from(current_score.value) - i64::from(prev_score.value),
        )),
    }
}
