//! Dashboard pipeline orchestration
//!
//! This module provides the public API the presentation layer calls: one
//! query in, plain structured results out. Each call re-derives everything
//! from the record set; the engine holds no state between calls and every
//! computation is bounded by the record count, so full recomputation per
//! request is the deliberate design.
//!
//! Pipeline: window selection → metric snapshots (one per window) →
//! composite scores → delta comparison → insight generation → chart series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::insights::{self, InsightReport};
use crate::metrics::MetricSnapshot;
use crate::score::{compute_score, Score};
use crate::trend::{self, DeltaSet};
use crate::types::{DashboardQuery, DateRange, SessionRecord};
use crate::window::select_windows;

/// One point of a date-keyed chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Total active minutes for one activity label, for the breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTotal {
    pub activity: String,
    pub minutes: u32,
}

/// Everything the presentation layer needs to render one dashboard view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResult {
    pub current_range: DateRange,
    pub previous_range: DateRange,
    pub current: MetricSnapshot,
    /// Absent when the previous window holds no records
    pub previous: Option<MetricSnapshot>,
    pub current_score: Score,
    pub previous_score: Option<Score>,
    pub deltas: DeltaSet,
    pub insights: InsightReport,
    /// Total active minutes per day in the current window, date ascending
    pub daily_minutes: Vec<SeriesPoint>,
    /// Per-record mood values in the current window, date ascending
    pub mood_series: Vec<SeriesPoint>,
    /// Per-record sleep values in the current window, date ascending
    pub sleep_series: Vec<SeriesPoint>,
    /// Minutes per activity in the current window, largest first
    pub activity_breakdown: Vec<ActivityTotal>,
    /// The current window's records, most recent first, for the detail table
    pub records: Vec<SessionRecord>,
}

/// Outcome of a dashboard query.
///
/// `NoData` is a recognized terminal state for the query, distinct from an
/// error: no record matches the filters, and the caller recovers by widening
/// them or adding data.
#[derive(Debug, Clone)]
pub enum DashboardOutcome {
    NoData,
    Ready(Box<DashboardResult>),
}

/// Run the full analytics pipeline for one query
pub fn compute_dashboard(records: &[SessionRecord], query: &DashboardQuery) -> DashboardOutcome {
    let Some(pair) = select_windows(records, query) else {
        return DashboardOutcome::NoData;
    };

    // A reference-date override can point the current window at a span with
    // no records; that is the same empty-result state.
    let Some(current) = MetricSnapshot::from_records(&pair.current.records) else {
        return DashboardOutcome::NoData;
    };

    let previous = MetricSnapshot::from_records(&pair.previous.records);
    let current_score = compute_score(&current);
    let previous_score = previous.as_ref().map(compute_score);

    let deltas: DeltaSet = trend::compare(
        &current,
        current_score,
        previous
            .as_ref()
            .zip(previous_score),
    );
    let insights = insights::generate(&current, current_score, &deltas);

    let daily_minutes = daily_minutes(&pair.current.records);
    let mood_series = value_series(&pair.current.records, |r| f64::from(r.mood));
    let sleep_series = value_series(&pair.current.records, |r| r.sleep_hours);
    let activity_breakdown = activity_breakdown(&pair.current.records);

    let mut detail = pair.current.records.clone();
    detail.sort_by(|a, b| b.date.cmp(&a.date));

    DashboardOutcome::Ready(Box::new(DashboardResult {
        current_range: pair.current.range,
        previous_range: pair.previous.range,
        current,
        previous,
        current_score,
        previous_score,
        deltas,
        insights,
        daily_minutes,
        mood_series,
        sleep_series,
        activity_breakdown,
        records: detail,
    }))
}

fn daily_minutes(records: &[SessionRecord]) -> Vec<SeriesPoint> {
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for record in records {
        *per_day.entry(record.date).or_insert(0) += record.duration_minutes;
    }
    per_day
        .into_iter()
        .map(|(date, minutes)| SeriesPoint {
            date,
            value: f64::from(minutes),
        })
        .collect()
}

fn value_series(records: &[SessionRecord], value: impl Fn(&SessionRecord) -> f64) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = records
        .iter()
        .map(|r| SeriesPoint {
            date: r.date,
            value: value(r),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

fn activity_breakdown(records: &[SessionRecord]) -> Vec<ActivityTotal> {
    let mut per_activity: BTreeMap<String, u32> = BTreeMap::new();
    for record in records {
        *per_activity
            .entry(record.activity.label().to_string())
            .or_insert(0) += record.duration_minutes;
    }

    let mut totals: Vec<ActivityTotal> = per_activity
        .into_iter()
        .map(|(activity, minutes)| ActivityTotal { activity, minutes })
        .collect();
    totals.sort_by(|a, b| {
        b.minutes
            .cmp(&a.minutes)
            .then_with(|| a.activity.cmp(&b.activity))
    });
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::TrendDirection;
    use crate::types::Activity;
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(date: &str, activity: Activity, minutes: u32, mood: u8, sleep: f64) -> SessionRecord {
        SessionRecord::new(day(date), activity, minutes, 3, mood, sleep, "").unwrap()
    }

    #[test]
    fn test_end_to_end_first_period() {
        // Two records, two-day window, no history before it
        let records = vec![
            record("2024-01-01", Activity::Walk, 30, 4, 7.0),
            record("2024-01-02", Activity::Walk, 30, 4, 7.0),
        ];
        let query = DashboardQuery {
            window_days: 2,
            reference_date: Some(day("2024-01-02")),
            ..Default::default()
        };

        let DashboardOutcome::Ready(result) = compute_dashboard(&records, &query) else {
            panic!("expected a ready dashboard");
        };

        assert_eq!(result.current.session_count, 2);
        assert_eq!(result.current.total_minutes, 60);
        assert_eq!(result.current.mean_mood, 4.0);
        assert_eq!(result.current.mean_sleep_hours, 7.0);
        assert_eq!(result.current.streak_days, 2);

        // No previous period: deltas unavailable, baseline messages in place
        assert_eq!(result.previous, None);
        assert_eq!(result.previous_score, None);
        assert!(result.deltas.score.is_none());
        assert_eq!(result.insights.trend, TrendDirection::Unavailable);
        assert!(result.insights.strengths[0].contains("baseline"));
    }

    #[test]
    fn test_no_data_outcome() {
        let records = vec![record("2024-01-01", Activity::Walk, 30, 2, 7.0)];
        let query = DashboardQuery {
            min_mood: 4,
            ..Default::default()
        };
        assert!(matches!(
            compute_dashboard(&records, &query),
            DashboardOutcome::NoData
        ));
    }

    #[test]
    fn test_reference_override_onto_empty_span_is_no_data() {
        let records = vec![record("2024-01-01", Activity::Walk, 30, 4, 7.0)];
        let query = DashboardQuery {
            window_days: 7,
            reference_date: Some(day("2024-06-01")),
            ..Default::default()
        };
        assert!(matches!(
            compute_dashboard(&records, &query),
            DashboardOutcome::NoData
        ));
    }

    #[test]
    fn test_two_period_comparison() {
        let records = vec![
            record("2024-01-08", Activity::Run, 60, 5, 8.0),
            record("2024-01-09", Activity::Run, 60, 5, 8.0),
            record("2024-01-02", Activity::Run, 30, 3, 6.0),
        ];
        let query = DashboardQuery {
            window_days: 7,
            reference_date: Some(day("2024-01-09")),
            ..Default::default()
        };

        let DashboardOutcome::Ready(result) = compute_dashboard(&records, &query) else {
            panic!("expected a ready dashboard");
        };

        assert_eq!(result.current.session_count, 2);
        let previous = result.previous.unwrap();
        assert_eq!(previous.session_count, 1);

        let minutes = result.deltas.total_minutes.as_ref().unwrap();
        assert_eq!(minutes.value, 90.0);
        assert_eq!(result.insights.trend, TrendDirection::Improving);
    }

    #[test]
    fn test_chart_series() {
        let records = vec![
            record("2024-01-02", Activity::Walk, 30, 4, 7.0),
            record("2024-01-02", Activity::Run, 20, 5, 7.5),
            record("2024-01-01", Activity::Walk, 40, 3, 6.5),
        ];
        let query = DashboardQuery {
            window_days: 7,
            ..Default::default()
        };

        let DashboardOutcome::Ready(result) = compute_dashboard(&records, &query) else {
            panic!("expected a ready dashboard");
        };

        // Two sessions on the 2nd sum into one point
        assert_eq!(
            result.daily_minutes,
            vec![
                SeriesPoint { date: day("2024-01-01"), value: 40.0 },
                SeriesPoint { date: day("2024-01-02"), value: 50.0 },
            ]
        );
        assert_eq!(result.mood_series.len(), 3);
        assert_eq!(result.mood_series[0].date, day("2024-01-01"));

        assert_eq!(
            result.activity_breakdown,
            vec![
                ActivityTotal { activity: "Walk".to_string(), minutes: 70 },
                ActivityTotal { activity: "Run".to_string(), minutes: 20 },
            ]
        );

        // Detail table is most recent first
        assert_eq!(result.records[0].date, day("2024-01-02"));
        assert_eq!(result.records[2].date, day("2024-01-01"));
    }
}
