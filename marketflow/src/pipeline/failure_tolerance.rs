//! Failure handling for linear pipeline runs.
//!
//! By default a failed stage only leaves an error marker on the state and the
//! next stage still runs. Fail-fast mode stops after the first failure and
//! marks the remaining stages skipped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How to handle stage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Record the failure and run every remaining stage (default).
    #[default]
    ContinueOnFailure,
    /// Stop after the first failed stage.
    FailFast,
}

/// Record of a stage failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Stage name.
    pub stage: String,
    /// Error message left on the state.
    pub error: String,
    /// When the failure was observed.
    pub timestamp: DateTime<Utc>,
}

impl FailureRecord {
    /// Creates a new failure record stamped now.
    #[must_use]
    pub fn new(stage: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            error: error.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureSummary {
    /// Total number of stages.
    pub total_stages: usize,
    /// Number of completed stages.
    pub completed_stages: usize,
    /// Number of failed stages.
    pub failed_stages: usize,
    /// Stages not run after a fail-fast stop.
    pub skipped_stages: Vec<String>,
    /// List of failure records, in stage order.
    pub failures: Vec<FailureRecord>,
}

impl FailureSummary {
    /// Returns the share of stages that completed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total_stages == 0 {
            return 0.0;
        }
        self.completed_stages as f64 / self.total_stages as f64
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Collects stage outcomes during a run.
#[derive(Debug)]
pub struct FailureCollector {
    /// Failure mode.
    pub mode: FailureMode,
    failures: Vec<FailureRecord>,
    completed_stages: Vec<String>,
    skipped_stages: Vec<String>,
}

impl FailureCollector {
    /// Creates a new failure collector.
    #[must_use]
    pub fn new(mode: FailureMode) -> Self {
        Self {
            mode,
            failures: Vec::new(),
            completed_stages: Vec::new(),
            skipped_stages: Vec::new(),
        }
    }

    /// Records a stage failure.
    pub fn record_failure(&mut self, record: FailureRecord) {
        self.failures.push(record);
    }

    /// Records a stage completion.
    pub fn record_completion(&mut self, stage: &str) {
        self.completed_stages.push(stage.to_string());
    }

    /// Records a stage that was not run.
    pub fn record_skip(&mut self, stage: &str) {
        self.skipped_stages.push(stage.to_string());
    }

    /// Returns true if execution should stop based on mode.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        match self.mode {
            FailureMode::FailFast => !self.failures.is_empty(),
            FailureMode::ContinueOnFailure => false,
        }
    }

    /// Builds the summary for a pipeline of `total_stages` stages.
    #[must_use]
    pub fn summary(&self, total_stages: usize) -> FailureSummary {
        FailureSummary {
            total_stages,
            completed_stages: self.completed_stages.len(),
            failed_stages: self.failures.len(),
            skipped_stages: self.skipped_stages.clone(),
            failures: self.failures.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_continues() {
        let mut collector = FailureCollector::new(FailureMode::default());
        collector.record_failure(FailureRecord::new("market_research", "boom"));
        assert!(!collector.should_stop());
        assert_eq!(collector.summary(4).failures[0].stage, "market_research");
    }

    #[test]
    fn test_fail_fast_stops_after_failure() {
        let mut collector = FailureCollector::new(FailureMode::FailFast);
        collector.record_completion("market_research");
        assert!(!collector.should_stop());

        collector.record_failure(FailureRecord::new("trend_analysis", "boom"));
        assert!(collector.should_stop());
    }

    #[test]
    fn test_summary() {
        let mut collector = FailureCollector::new(FailureMode::FailFast);
        collector.record_completion("market_research");
        collector.record_failure(FailureRecord::new("trend_analysis", "boom"));
        collector.record_skip("strategy_planning");
        collector.record_skip("content_creation");

        let summary = collector.summary(4);
        assert_eq!(summary.completed_stages, 1);
        assert_eq!(summary.failed_stages, 1);
        assert_eq!(summary.skipped_stages.len(), 2);
        assert!(summary.has_failures());
        assert!((summary.success_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failure_mode_serde() {
        let mode: FailureMode = serde_json::from_str("\"fail_fast\"").unwrap();
        assert_eq!(mode, FailureMode::FailFast);
    }

    #[test]
    fn test_empty_summary_rate() {
        assert_eq!(FailureCollector::new(FailureMode::FailFast).summary(0).success_rate(), 0.0);
    }
}
