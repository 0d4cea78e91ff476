//! Per-call log record and time handling

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::caller::Caller;
use super::level::{Level, Tag};
use crate::config::{LogConfig, DEFAULT_TIME_FORMAT};

/// A single log record, built fresh for every call and dropped after rendering
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    /// Truncated function path
    pub function: String,
    /// Truncated `path:line`
    pub location: String,
    /// Time of the call in the configured zone
    pub time: DateTime<Tz>,
    pub tag: Tag,
}

impl LogRecord {
    /// Build a record for `now` using the zone and truncation depths in `config`
    pub fn new(
        config: &LogConfig,
        level: Level,
        caller: &Caller,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            function: caller.function_name(config.nested_func_level),
            location: caller.location(config.nested_location_level),
            time: now.with_timezone(&resolve_time_zone(&config.time_zone)),
            tag: level.tag(),
        }
    }

    /// Timestamp rendered with `pattern`
    pub fn timestamp(&self, pattern: &str) -> String {
        format_time(&self.time, pattern)
    }

    /// Calendar day of the record, used for the log file name
    pub fn day(&self) -> String {
        self.time.format("%Y-%m-%d").to_string()
    }
}

/// Parse an IANA zone name, silently falling back to UTC
pub fn resolve_time_zone(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or(Tz::UTC)
}

/// Format `time`, using the default pattern when `pattern` is not a valid strftime string
pub fn format_time(time: &DateTime<Tz>, pattern: &str) -> String {
    let valid = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    let mut out = String::new();
    if valid && write!(out, "{}", time.format(pattern)).is_ok() {
        return out;
    }
    tracing::debug!("Invalid time format {:?}, using default", pattern);
    time.format(DEFAULT_TIME_FORMAT).to_string()
}
