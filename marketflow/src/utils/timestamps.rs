//! Timestamp helpers.

use chrono::{DateTime, Utc};

/// Represents a timestamp that can be serialized/deserialized.
pub type Timestamp = DateTime<Utc>;

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Human-readable date used in report headers, e.g. `2025-03-14 09:26 UTC`.
#[must_use]
pub fn report_date(timestamp: &Timestamp) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}
