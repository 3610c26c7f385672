//! SM-2 (SuperMemo 2) spaced repetition scheduler, four-button variant.
//!
//! - Again resets the streak: repetition goes to 0 and the item returns after one time unit
//! - Hard/Good/Easy grow the interval: initial interval → second interval → interval × EF
//! - EF is adjusted after every review using the SM-2 formula with q ∈ {0, 3, 4, 5}
//! - EF never falls below 1.3

use super::{Rating, ReviewState};
use crate::config::{MIN_EFACTOR, SchedulerConfig};
use chrono::{DateTime, Duration, Utc};

/// Stateless transform from (state, rating, now) to the next state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Calculates the review state that follows `rating` given at `now`.
    /// The input state is left untouched.
    pub fn calculate_next_review(
        &self,
        state: &ReviewState,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> ReviewState {
        let (interval, repetition) = if rating.is_success() {
            let interval = match state.repetition {
                0 => self.config.initial_interval,
                1 => self.config.second_interval,
                // Growth uses the EF from before this review
                _ => (state.interval as f64 * state.efactor).round() as u32,
            };
            (interval, state.repetition.saturating_add(1))
        } else {
            (1, 0)
        };

        let efactor = next_efactor(state.efactor, rating);
        let due_date = self.due_date_after(now, interval);

        tracing::trace!(?rating, interval, repetition, efactor, "sm2 transition");

        ReviewState {
            interval,
            repetition,
            efactor,
            due_date,
        }
    }

    /// `now + interval × time_unit`, saturating at the latest representable instant.
    pub fn due_date_after(&self, now: DateTime<Utc>, interval: u32) -> DateTime<Utc> {
        i32::try_from(interval)
            .ok()
            .and_then(|units| self.config.time_unit.checked_mul(units))
            .and_then(|offset: Duration| now.checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// SM-2 ease update: EF' = EF + (0.1 − (5−q)(0.08 + (5−q)·0.02)), floored at 1.3.
pub fn next_efactor(efactor: f64, rating: Rating) -> f64 {
    let d = 5.0 - rating.quality() as f64;
    let new_ef = efactor + (0.1 - d * (0.08 + d * 0.02));
    new_ef.max(MIN_EFACTOR)
}
