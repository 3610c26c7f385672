//! Per-item memory-strength record evolved by the scheduler.
use crate::config::DEFAULT_EFACTOR;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All tracked items keyed by identifier.
pub type ReviewMap = BTreeMap<String, ReviewState>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Spacing before the next review, in scheduler time units
    pub interval: u32,
    /// Consecutive successful reviews since the last failure
    pub repetition: u32,
    pub efactor: f64,
    pub due_date: DateTime<Utc>,
}

impl ReviewState {
    /// Fresh item, eligible for review at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            interval: 0,
            repetition: 0,
            efactor: DEFAULT_EFACTOR,
            due_date: now,
        }
    }

    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.due_date <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_new_state_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let state = ReviewState::new(now);

        assert_eq!(state.interval, 0);
        assert_eq!(state.repetition, 0);
        assert_eq!(state.efactor, 2.5);
        assert_eq!(state.due_date, now);
        assert!(state.is_due_at(now));
    }

    #[test]
    fn test_not_due_before_due_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut state = ReviewState::new(now);
        state.due_date = now + Duration::minutes(1);

        assert!(!state.is_due_at(now));
        assert!(state.is_due_at(now + Duration::minutes(1)));
    }

    #[test]
    fn test_json_field_names() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(ReviewState::new(now)).unwrap();

        assert_eq!(json["interval"], 0);
        assert_eq!(json["repetition"], 0);
        assert_eq!(json["efactor"], 2.5);
        assert!(json["dueDate"].as_str().unwrap().starts_with("2024-03-01T12:00:00"));
    }

    #[test]
    fn test_parses_iso_string_with_millis() {
        let json = r#"{"interval":6,"repetition":2,"efactor":2.36,"dueDate":"2024-05-10T08:30:00.123Z"}"#;
        let state: ReviewState = serde_json::from_str(json).unwrap();

        assert_eq!(state.interval, 6);
        assert_eq!(state.repetition, 2);
        assert!((state.efactor - 2.36).abs() < 1e-9);
        assert_eq!(
            state.due_date,
            Utc.with_ymd_and_hms(2024, 5, 10, 8, 30, 0).unwrap() + Duration::milliseconds(123)
        );
    }
}
