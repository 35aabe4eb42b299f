//! Raw metric aggregation
//!
//! Pure functions computing the per-window metric snapshot: session count,
//! total active minutes, mean mood, mean sleep, and the consecutive-day
//! activity streak.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::SessionRecord;

/// Aggregate metrics for one window, immutable once computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub session_count: usize,
    pub total_minutes: u32,
    pub mean_mood: f64,
    pub mean_sleep_hours: f64,
    pub streak_days: u32,
}

impl MetricSnapshot {
    /// Compute the snapshot for a window's records.
    ///
    /// Returns `None` for an empty window; the mean of an empty set is
    /// undefined and callers are expected to have checked emptiness.
    pub fn from_records(records: &[SessionRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let count = records.len();
        let total_minutes: u32 = records.iter().map(|r| r.duration_minutes).sum();
        let mood_sum: f64 = records.iter().map(|r| f64::from(r.mood)).sum();
        let sleep_sum: f64 = records.iter().map(|r| r.sleep_hours).sum();

        Some(Self {
            session_count: count,
            total_minutes,
            mean_mood: mood_sum / count as f64,
            mean_sleep_hours: sleep_sum / count as f64,
            streak_days: streak_days(records),
        })
    }
}

/// Count consecutive calendar days with at least one session, ending at the
/// most recent active day. A day with multiple sessions counts once; the
/// scan stops at the first gap.
pub fn streak_days(records: &[SessionRecord]) -> u32 {
    let days: BTreeSet<NaiveDate> = records.iter().map(|r| r.date).collect();

    let mut streak = 0u32;
    let mut cursor: Option<NaiveDate> = None;
    for day in days.iter().rev().copied() {
        match cursor {
            None => streak = 1,
            Some(prev) if prev - day == Duration::days(1) => streak += 1,
            Some(_) => break,
        }
        cursor = Some(day);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Activity;
    use pretty_assertions::assert_eq;

    fn record(date: &str, minutes: u32, mood: u8, sleep: f64) -> SessionRecord {
        SessionRecord::new(date.parse().unwrap(), Activity::Walk, minutes, 3, mood, sleep, "")
            .unwrap()
    }

    #[test]
    fn test_empty_window_has_no_snapshot() {
        assert_eq!(MetricSnapshot::from_records(&[]), None);
    }

    #[test]
    fn test_snapshot_aggregates() {
        let records = vec![
            record("2024-01-01", 30, 3, 6.0),
            record("2024-01-02", 45, 5, 8.0),
        ];
        let snapshot = MetricSnapshot::from_records(&records).unwrap();

        assert_eq!(snapshot.session_count, 2);
        assert_eq!(snapshot.total_minutes, 75);
        assert_eq!(snapshot.mean_mood, 4.0);
        assert_eq!(snapshot.mean_sleep_hours, 7.0);
        assert_eq!(snapshot.streak_days, 2);
    }

    #[test]
    fn test_means_stay_in_input_ranges() {
        let records = vec![
            record("2024-01-01", 30, 1, 0.5),
            record("2024-01-03", 30, 5, 24.0),
            record("2024-01-05", 30, 2, 7.25),
        ];
        let snapshot = MetricSnapshot::from_records(&records).unwrap();

        assert!(snapshot.mean_mood >= 1.0 && snapshot.mean_mood <= 5.0);
        assert!(snapshot.mean_sleep_hours >= 0.0 && snapshot.mean_sleep_hours <= 24.0);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        // D, D-1, D-2 consecutive, plus an older isolated D-10
        let records = vec![
            record("2024-01-20", 30, 4, 7.0),
            record("2024-01-19", 30, 4, 7.0),
            record("2024-01-18", 30, 4, 7.0),
            record("2024-01-10", 30, 4, 7.0),
        ];
        assert_eq!(streak_days(&records), 3);
    }

    #[test]
    fn test_streak_single_date() {
        let records = vec![record("2024-01-20", 30, 4, 7.0)];
        assert_eq!(streak_days(&records), 1);
    }

    #[test]
    fn test_streak_empty() {
        assert_eq!(streak_days(&[]), 0);
    }

    #[test]
    fn test_streak_counts_day_with_multiple_sessions_once() {
        let records = vec![
            record("2024-01-20", 30, 4, 7.0),
            record("2024-01-20", 20, 4, 7.0),
            record("2024-01-19", 30, 4, 7.0),
        ];
        assert_eq!(streak_days(&records), 2);
    }
}
