//! Insight and recommendation generation
//!
//! Rule-based classifier turning deltas and absolute metric values into
//! short natural-language strengths, watch-points, and recommendations.
//! Each threshold rule fires at most once; strengths and watch-points are
//! capped at three entries, recommendations at four.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricSnapshot;
use crate::score::Score;
use crate::trend::DeltaSet;

/// Minutes delta triggering a volume insight, in either direction
pub const MINUTES_DELTA_THRESHOLD: f64 = 60.0;
/// Sleep delta (hours) triggering a sleep insight
pub const SLEEP_DELTA_THRESHOLD: f64 = 0.25;
/// Mood delta triggering a wellbeing insight
pub const MOOD_DELTA_THRESHOLD: f64 = 0.25;
/// Score delta triggering an overall-trend insight
pub const SCORE_DELTA_THRESHOLD: f64 = 5.0;

/// Weekly minutes below which a volume recommendation fires
pub const LOW_VOLUME_MINUTES: u32 = 120;
/// Mean sleep below which a bedtime recommendation fires
pub const LOW_SLEEP_HOURS: f64 = 7.0;
/// Mean mood at or below which a gentle-session recommendation fires
pub const LOW_MOOD: f64 = 3.0;

const MAX_INSIGHTS: usize = 3;
const MAX_RECOMMENDATIONS: usize = 4;

/// Direction of the overall trend, derived from the score delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
    Unavailable,
}

impl TrendDirection {
    fn from_deltas(deltas: &DeltaSet) -> Self {
        match &deltas.score {
            None => TrendDirection::Unavailable,
            Some(delta) if delta.value > 0.0 => TrendDirection::Improving,
            Some(delta) if delta.value < 0.0 => TrendDirection::Declining,
            Some(_) => TrendDirection::Stable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
            TrendDirection::Unavailable => "unavailable",
        }
    }
}

/// The textual output of one dashboard query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// What went well this period, at most three entries
    pub strengths: Vec<String>,
    /// Watch-points, at most three entries
    pub attentions: Vec<String>,
    /// One sentence reporting the score, its tier, and the trend direction
    pub synthesis: String,
    pub trend: TrendDirection,
    /// Actionable suggestions from absolute current values, at most four
    pub recommendations: Vec<String>,
}

/// Generate the insight report for the current period.
///
/// With no previous period, the delta threshold rules are skipped entirely
/// and both insight lists are replaced by fixed baseline-building messages.
pub fn generate(snapshot: &MetricSnapshot, score: Score, deltas: &DeltaSet) -> InsightReport {
    let trend = TrendDirection::from_deltas(deltas);

    let (strengths, attentions) = if deltas.has_previous() {
        delta_insights(deltas)
    } else {
        baseline_messages()
    };

    let synthesis = format!(
        "Overall wellness score {}/100 ({}), trend {}.",
        score.value,
        score.status.label(),
        trend.label()
    );

    InsightReport {
        strengths,
        attentions,
        synthesis,
        trend,
        recommendations: recommendations(snapshot),
    }
}

fn delta_insights(deltas: &DeltaSet) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut attentions = Vec::new();

    if let Some(minutes) = &deltas.total_minutes {
        if minutes.value >= MINUTES_DELTA_THRESHOLD {
            strengths.push("Activity volume is clearly increasing.".to_string());
        } else if minutes.value <= -MINUTES_DELTA_THRESHOLD {
            attentions
                .push("Activity is declining; consider restarting with short sessions.".to_string());
        }
    }

    if let Some(sleep) = &deltas.mean_sleep_hours {
        if sleep.value >= SLEEP_DELTA_THRESHOLD {
            strengths.push("Sleep is improving.".to_string());
        } else if sleep.value <= -SLEEP_DELTA_THRESHOLD {
            attentions.push("Sleep is declining; energy and recovery are at risk.".to_string());
        }
    }

    if let Some(mood) = &deltas.mean_mood {
        if mood.value >= MOOD_DELTA_THRESHOLD {
            strengths.push("Wellbeing is improving.".to_string());
        } else if mood.value <= -MOOD_DELTA_THRESHOLD {
            attentions.push("Wellbeing is declining; watch training load and recovery.".to_string());
        }
    }

    if let Some(score) = &deltas.score {
        if score.value >= SCORE_DELTA_THRESHOLD {
            strengths.push("Clear overall improvement.".to_string());
        } else if score.value <= -SCORE_DELTA_THRESHOLD {
            attentions.push("Overall decline; prioritize corrective action.".to_string());
        }
    }

    strengths.truncate(MAX_INSIGHTS);
    attentions.truncate(MAX_INSIGHTS);

    if strengths.is_empty() {
        strengths.push("No standout strength this period; steady logging is the base to build on.".to_string());
    }
    if attentions.is_empty() {
        attentions.push("No particular watch-point this period.".to_string());
    }

    (strengths, attentions)
}

fn baseline_messages() -> (Vec<String>, Vec<String>) {
    (
        vec!["First tracked period: every logged session helps establish your baseline.".to_string()],
        vec![
            "Not enough history to compare periods yet; keep logging to unlock trend insights."
                .to_string(),
        ],
    )
}

fn recommendations(snapshot: &MetricSnapshot) -> Vec<String> {
    let mut out = Vec::new();

    if snapshot.total_minutes < LOW_VOLUME_MINUTES {
        out.push("Add two short sessions (20-30 minutes) to lift your activity volume.".to_string());
    } else {
        out.push("Maintain the current routine, alternating intensity across sessions.".to_string());
    }

    if snapshot.mean_sleep_hours < LOW_SLEEP_HOURS {
        out.push("Stabilize your bedtime to bring sleep closer to 7-8 hours.".to_string());
    }

    if snapshot.mean_mood <= LOW_MOOD {
        out.push(
            "Schedule a gentle session (walk or yoga) plus at least 15 minutes outdoors."
                .to_string(),
        );
    }

    out.truncate(MAX_RECOMMENDATIONS);
    out
}
