//! Core record and query types
//!
//! This module defines the session record as it exists in memory (strictly
//! typed, carrying a stable opaque id) and the query object the presentation
//! layer passes into the dashboard pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// Activity label for a logged session.
///
/// The set is closed by convention only; records are stored as free text, so
/// unknown labels round-trip through `Other` rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Walk,
    Run,
    Yoga,
    Strength,
    Cycling,
    Swim,
    /// For labels outside the conventional set
    #[serde(untagged)]
    Other(String),
}

impl Activity {
    /// Parse a stored label, case-insensitively for the conventional set
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "walk" => Activity::Walk,
            "run" => Activity::Run,
            "yoga" => Activity::Yoga,
            "strength" => Activity::Strength,
            "cycling" => Activity::Cycling,
            "swim" => Activity::Swim,
            _ => Activity::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Activity::Walk => "Walk",
            Activity::Run => "Run",
            Activity::Yoga => "Yoga",
            Activity::Strength => "Strength",
            Activity::Cycling => "Cycling",
            Activity::Swim => "Swim",
            Activity::Other(name) => name.as_str(),
        }
    }
}

/// One logged exercise session.
///
/// The `id` is an opaque handle assigned by the store when the record enters
/// the in-memory set; it is not part of the persisted row. Deletion by id is
/// therefore stable under re-sorting and filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub activity: Activity,
    pub duration_minutes: u32,
    /// Perceived intensity, 1-5
    pub intensity: u8,
    /// Wellbeing rating, 1-5
    pub mood: u8,
    /// Sleep the previous night, 0-24
    pub sleep_hours: f64,
    /// Optional free text, may be empty
    pub comment: String,
}

impl SessionRecord {
    /// Build a validated session record ready for [`crate::store::RecordStore::append`].
    ///
    /// A session describing neither activity nor sleep is rejected, as are
    /// values outside their entry ranges (duration 0-600, intensity and mood
    /// 1-5, sleep 0-24). The id is assigned by the store at append time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        activity: Activity,
        duration_minutes: u32,
        intensity: u8,
        mood: u8,
        sleep_hours: f64,
        comment: impl Into<String>,
    ) -> Result<Self, EngineError> {
        if duration_minutes == 0 && sleep_hours == 0.0 {
            return Err(EngineError::EmptyRecord);
        }
        if duration_minutes > 600 {
            return Err(EngineError::OutOfRange {
                field: "duration_minutes",
                value: duration_minutes.to_string(),
            });
        }
        if !(1..=5).contains(&intensity) {
            return Err(EngineError::OutOfRange {
                field: "intensity",
                value: intensity.to_string(),
            });
        }
        if !(1..=5).contains(&mood) {
            return Err(EngineError::OutOfRange {
                field: "mood",
                value: mood.to_string(),
            });
        }
        if !(0.0..=24.0).contains(&sleep_hours) {
            return Err(EngineError::OutOfRange {
                field: "sleep_hours",
                value: sleep_hours.to_string(),
            });
        }

        // Comments are persisted one row per record, so embedded newlines
        // are flattened at entry.
        let comment = comment.into().trim().replace(['\r', '\n'], " ");

        Ok(Self {
            id: Uuid::nil(),
            date,
            activity,
            duration_minutes,
            intensity,
            mood,
            sleep_hours,
            comment,
        })
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days spanned, both ends inclusive
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Filter parameters for one dashboard query.
///
/// This is the explicit configuration object the caller passes into
/// [`crate::dashboard::compute_dashboard`]; the engine holds no state
/// between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Length of the current window in calendar days
    pub window_days: u32,
    /// End of the current window; defaults to the latest date on record
    pub reference_date: Option<NaiveDate>,
    /// Activities to include; empty means all
    pub activities: Vec<Activity>,
    /// Inclusive mood floor
    pub min_mood: u8,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            window_days: 30,
            reference_date: None,
            activities: Vec::new(),
            min_mood: 1,
        }
    }
}

impl DashboardQuery {
    /// Whether a record passes the activity and mood filters
    pub fn matches(&self, record: &SessionRecord) -> bool {
        let activity_ok = self.activities.is_empty() || self.activities.contains(&record.activity);
        activity_ok && record.mood >= self.min_mood
    }
}
