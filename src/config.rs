//! Scheduler configuration and engine-wide constants.
//!
//! The time unit is the only knob that changes how fast items come back.
//! Production uses one day; a minute makes the whole cycle observable in a
//! single sitting without touching any other formula.

use chrono::Duration;

/// Key under which the whole review map is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "hsk_srs_data";

/// Ease factor of a freshly added item.
pub const DEFAULT_EFACTOR: f64 = 2.5;

/// Ease factor never drops below this.
pub const MIN_EFACTOR: f64 = 1.3;

/// Environment variable read by [`SchedulerConfig::from_env`].
pub const TIME_UNIT_ENV: &str = "SRS_TIME_UNIT";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    pub fn duration(self) -> Duration {
        match self {
            TimeUnit::Minute => Duration::minutes(1),
            TimeUnit::Hour => Duration::hours(1),
            TimeUnit::Day => Duration::days(1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Length of one interval step
    pub time_unit: Duration,
    /// Interval after the first success (in time units)
    pub initial_interval: u32,
    /// Interval after the second consecutive success (in time units)
    pub second_interval: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            time_unit: TimeUnit::Day.duration(),
            initial_interval: 1,
            second_interval: 6,
        }
    }
}

impl SchedulerConfig {
    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// Default configuration with the time unit taken from `SRS_TIME_UNIT`.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(TIME_UNIT_ENV) {
            Ok(raw) => match parse_time_unit(&raw) {
                Some(unit) => config.with_time_unit(unit),
                None => {
                    tracing::warn!(value = %raw, "Unrecognized {}, using one day", TIME_UNIT_ENV);
                    config
                }
            },
            Err(_) => config,
        }
    }
}

/// Accepts `minute`, `hour`, `day` or a positive number of seconds.
pub fn parse_time_unit(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    match raw.to_ascii_lowercase().as_str() {
        "minute" | "min" | "m" => Some(TimeUnit::Minute.duration()),
        "hour" | "h" => Some(TimeUnit::Hour.duration()),
        "day" | "d" => Some(TimeUnit::Day.duration()),
        _ => raw
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds),
    }
}
