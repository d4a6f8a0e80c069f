//! Stage timing and event payloads.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::core::StageStatus;

/// Measures how long a stage or run took.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Finishes the span and returns the duration.
    #[must_use]
    pub fn finish(self) -> f64 {
        self.elapsed_ms()
    }
}

/// Attributes attached to stage events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageSpanAttributes {
    /// Run identifier.
    pub run_id: String,
    /// Stage name.
    pub stage: String,
    /// Outcome, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StageStatus>,
    /// Duration in milliseconds, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    /// Error message of a failed stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StageSpanAttributes {
    /// Creates attributes for `stage` in run `run_id`.
    #[must_use]
    pub fn new(run_id: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            stage: stage.into(),
            ..Default::default()
        }
    }

    /// Sets the stage status.
    #[must_use]
    pub fn with_status(mut self, status: StageStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Sets the error message.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// JSON payload for an event sink.
    #[must_use]
    pub fn to_event_data(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_timer() {
        let timer = SpanTimer::start();
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(timer.finish() >= 10.0);
    }

    #[test]
    fn test_event_data_skips_unset_fields() {
        let data = StageSpanAttributes::new("run-1", "trend_analysis").to_event_data();
        assert_eq!(data, serde_json::json!({"run_id": "run-1", "stage": "trend_analysis"}));

        let data = StageSpanAttributes::new("run-1", "trend_analysis")
            .with_status(StageStatus::Failed)
            .with_duration(12.5)
            .with_error("Trend analysis failed: boom")
            .to_event_data();
        assert_eq!(data["status"], "failed");
        assert_eq!(data["duration_ms"], 12.5);
    }
}
