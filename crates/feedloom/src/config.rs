//! Configuration for the feed viewer.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};

use feedloom_core::Timestamp;

/// Unit of the numeric timestamps a node writes.
///
/// Nodes stamp posts with epoch seconds; some deployments use milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampUnit {
    #[default]
    Seconds,
    Millis,
}

impl TimestampUnit {
    /// Convert a timestamp to a UTC date, if it is in range.
    pub fn to_datetime(&self, timestamp: Timestamp) -> Option<DateTime<Utc>> {
        let value = i64::try_from(timestamp.value()).ok()?;
        match self {
            TimestampUnit::Seconds => DateTime::from_timestamp(value, 0),
            TimestampUnit::Millis => DateTime::from_timestamp_millis(value),
        }
    }

    /// Human-readable rendering, falling back to the raw number when the
    /// value is out of range for a calendar date.
    pub fn format(&self, timestamp: Timestamp) -> String {
        match self.to_datetime(timestamp) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => timestamp.to_string(),
        }
    }
}

impl fmt::Display for TimestampUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampUnit::Seconds => f.write_str("seconds"),
            TimestampUnit::Millis => f.write_str("millis"),
        }
    }
}

impl FromStr for TimestampUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "seconds" => Ok(TimestampUnit::Seconds),
            "ms" | "millis" | "milliseconds" => Ok(TimestampUnit::Millis),
            other => Err(format!("unknown timestamp unit: {other}")),
        }
    }
}

/// Configuration for the Aggregator.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Bound on each collaborator request.
    pub request_timeout: Duration,
    /// Bound on the identity + logs fetch of one load cycle.
    pub load_timeout: Duration,
    /// How to read operation timestamps.
    pub timestamp_unit: TimestampUnit,
    /// Marker shown next to the viewer's own posts.
    pub self_marker: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            load_timeout: Duration::from_secs(30),
            timestamp_unit: TimestampUnit::Seconds,
            self_marker: "(Me)".to_string(),
        }
    }
}

impl FeedConfig {
    /// Set the per-request timeout. The load timeout never drops below it.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        if self.load_timeout < timeout {
            self.load_timeout = timeout;
        }
        self
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    pub fn with_timestamp_unit(mut self, unit: TimestampUnit) -> Self {
        self.timestamp_unit = unit;
        self
    }
}
