//! Period window selection
//!
//! Given a query, this module derives the current window (ending at the
//! reference date) and the previous window of equal length immediately
//! preceding it, with no gap and no overlap, and filters records into each.

use chrono::Duration;

use crate::types::{DashboardQuery, DateRange, SessionRecord};

/// One derived, ephemeral window: a date range plus the records inside it
#[derive(Debug, Clone)]
pub struct PeriodWindow {
    pub range: DateRange,
    pub records: Vec<SessionRecord>,
}

impl PeriodWindow {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The pair of adjacent windows a dashboard query compares
#[derive(Debug, Clone)]
pub struct WindowPair {
    pub current: PeriodWindow,
    pub previous: PeriodWindow,
}

/// Select the current and previous windows for a query.
///
/// Activity and mood filters apply identically to both windows. Returns
/// `None` when no record survives the filters; that is the recognized
/// "no data" state, not an error. A previous window with no records stays
/// in the pair as an empty window so that downstream comparison can report
/// deltas as unavailable instead of inventing a zero baseline.
pub fn select_windows(records: &[SessionRecord], query: &DashboardQuery) -> Option<WindowPair> {
    let filtered: Vec<&SessionRecord> = records.iter().filter(|r| query.matches(r)).collect();

    let end_cur = query
        .reference_date
        .or_else(|| filtered.iter().map(|r| r.date).max())?;

    let span = Duration::days(i64::from(query.window_days.max(1)) - 1);
    let start_cur = end_cur - span;
    let end_prev = start_cur - Duration::days(1);
    let start_prev = end_prev - span;

    let current_range = DateRange {
        start: start_cur,
        end: end_cur,
    };
    let previous_range = DateRange {
        start: start_prev,
        end: end_prev,
    };

    let collect = |range: DateRange| -> Vec<SessionRecord> {
        let mut inside: Vec<SessionRecord> = filtered
            .iter()
            .filter(|r| range.contains(r.date))
            .map(|r| (*r).clone())
            .collect();
        inside.sort_by_key(|r| r.date);
        inside
    };

    Some(WindowPair {
        current: PeriodWindow {
            range: current_range,
            records: collect(current_range),
        },
        previous: PeriodWindow {
            range: previous_range,
            records: collect(previous_range),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Activity;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(date: &str, activity: Activity, mood: u8) -> SessionRecord {
        SessionRecord::new(day(date), activity, 30, 3, mood, 7.0, "").unwrap()
    }

    #[test]
    fn test_windows_are_adjacent_and_equal_length() {
        let records = vec![record("2024-03-20", Activity::Walk, 4)];
        let query = DashboardQuery {
            window_days: 7,
            ..Default::default()
        };

        let pair = select_windows(&records, &query).unwrap();
        assert_eq!(pair.current.range.len_days(), 7);
        assert_eq!(pair.previous.range.len_days(), 7);
        assert_eq!(pair.current.range.end, day("2024-03-20"));
        assert_eq!(
            pair.previous.range.end + Duration::days(1),
            pair.current.range.start
        );
    }

    #[test]
    fn test_records_split_into_windows() {
        let records = vec![
            record("2024-03-20", Activity::Walk, 4),
            record("2024-03-15", Activity::Run, 4),
            record("2024-03-12", Activity::Walk, 4),
            record("2024-03-01", Activity::Walk, 4),
        ];
        let query = DashboardQuery {
            window_days: 7,
            ..Default::default()
        };

        let pair = select_windows(&records, &query).unwrap();
        // Current window: 2024-03-14 through 2024-03-20
        assert_eq!(pair.current.records.len(), 2);
        // Previous window: 2024-03-07 through 2024-03-13
        assert_eq!(pair.previous.records.len(), 1);
        assert_eq!(pair.previous.records[0].date, day("2024-03-12"));
    }

    #[test]
    fn test_filters_apply_to_both_windows() {
        let records = vec![
            record("2024-03-20", Activity::Walk, 4),
            record("2024-03-19", Activity::Run, 4),
            record("2024-03-12", Activity::Run, 4),
        ];
        let query = DashboardQuery {
            window_days: 7,
            activities: vec![Activity::Walk],
            ..Default::default()
        };

        let pair = select_windows(&records, &query).unwrap();
        assert_eq!(pair.current.records.len(), 1);
        assert!(pair.previous.is_empty());
    }

    #[test]
    fn test_no_data_after_filtering() {
        let records = vec![record("2024-03-20", Activity::Walk, 2)];
        let query = DashboardQuery {
            min_mood: 4,
            ..Default::default()
        };
        assert!(select_windows(&records, &query).is_none());
    }

    #[test]
    fn test_reference_date_override() {
        let records = vec![
            record("2024-03-20", Activity::Walk, 4),
            record("2024-03-05", Activity::Walk, 4),
        ];
        let query = DashboardQuery {
            window_days: 7,
            reference_date: Some(day("2024-03-10")),
            ..Default::default()
        };

        let pair = select_windows(&records, &query).unwrap();
        assert_eq!(pair.current.range.end, day("2024-03-10"));
        assert_eq!(pair.current.records.len(), 1);
        assert_eq!(pair.current.records[0].date, day("2024-03-05"));
    }

    #[test]
    fn test_single_day_window() {
        let records = vec![record("2024-03-20", Activity::Walk, 4)];
        let query = DashboardQuery {
            window_days: 1,
            ..Default::default()
        };

        let pair = select_windows(&records, &query).unwrap();
        assert_eq!(pair.current.range.start, pair.current.range.end);
        assert_eq!(pair.previous.range.end, day("2024-03-19"));
        assert_eq!(pair.previous.range.start, day("2024-03-19"));
    }
}
