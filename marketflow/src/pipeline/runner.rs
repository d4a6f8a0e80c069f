//! Sequential pipeline execution.

use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use super::failure_tolerance::{FailureCollector, FailureMode, FailureRecord, FailureSummary};
use crate::core::{MarketingInput, PipelineState, StageStatus};
use crate::events::{
    EventSink, PIPELINE_COMPLETED, PIPELINE_STARTED, STAGE_COMPLETED, STAGE_FAILED,
    STAGE_SKIPPED, STAGE_STARTED,
};
use crate::observability::{SpanTimer, StageSpanAttributes};
use crate::stages::Stage;

/// A validated, ordered list of stages.
///
/// Built by [`super::PipelineBuilder`]. Stages run one after another; the
/// state moves from each stage into the next.
pub struct Pipeline {
    name: String,
    stages: Vec<Arc<dyn Stage>>,
    failure_mode: FailureMode,
    event_sink: Arc<dyn EventSink>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("stages", &self.stage_names())
            .field("failure_mode", &self.failure_mode)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub(super) fn new(
        name: String,
        stages: Vec<Arc<dyn Stage>>,
        failure_mode: FailureMode,
        event_sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            name,
            stages,
            failure_mode,
            event_sink,
        }
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Gets the failure mode.
    #[must_use]
    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Runs a fresh state built from `input`.
    pub async fn run_input(&self, input: MarketingInput) -> PipelineState {
        self.run(PipelineState::new(input)).await
    }

    /// Runs every stage on `state` and returns the final state.
    pub async fn run(&self, state: PipelineState) -> PipelineState {
        self.run_with_summary(state).await.0
    }

    /// Runs every stage and also returns what happened to each.
    pub async fn run_with_summary(&self, mut state: PipelineState) -> (PipelineState, FailureSummary) {
        let run_timer = SpanTimer::start();
        let mut collector = FailureCollector::new(self.failure_mode);
        let run_id = state.run_id.clone();

        info!(pipeline = %self.name, run_id = %run_id, stages = self.stages.len(), "pipeline started");
        self.event_sink
            .emit(
                PIPELINE_STARTED,
                Some(serde_json::json!({
                    "pipeline": self.name,
                    "run_id": run_id,
                    "stages": self.stage_names(),
                })),
            )
            .await;

        for stage in &self.stages {
            let stage_name = stage.name();

            if collector.should_stop() {
                collector.record_skip(stage_name);
                let attrs = StageSpanAttributes::new(&run_id, stage_name).with_status(StageStatus::Skipped);
                self.event_sink.emit(STAGE_SKIPPED, Some(attrs.to_event_data())).await;
                continue;
            }

            self.event_sink
                .emit(
                    STAGE_STARTED,
                    Some(StageSpanAttributes::new(&run_id, stage_name).to_event_data()),
                )
                .await;

            let timer = SpanTimer::start();
            let error_before = state.error.clone();
            state = stage.execute(state).await;
            let duration_ms = timer.finish();

            let attrs = StageSpanAttributes::new(&run_id, stage_name).with_duration(duration_ms);
            let newly_errored = state.error.is_some() && state.error != error_before;
            if newly_errored || state.current_step == format!("{stage_name}_failed") {
                let error = state.error.clone().unwrap_or_default();
                warn!(pipeline = %self.name, stage = stage_name, error = %error, "stage failed");
                collector.record_failure(FailureRecord::new(stage_name, error.clone()));
                let attrs = attrs.with_status(StageStatus::Failed).with_error(error);
                self.event_sink.emit(STAGE_FAILED, Some(attrs.to_event_data())).await;
            } else {
                collector.record_completion(stage_name);
                let attrs = attrs.with_status(StageStatus::Completed);
                self.event_sink.emit(STAGE_COMPLETED, Some(attrs.to_event_data())).await;
            }
        }

        let summary = collector.summary(self.stages.len());
        let duration_ms = run_timer.finish();
        info!(
            pipeline = %self.name,
            run_id = %run_id,
            completed = summary.completed_stages,
            failed = summary.failed_stages,
            duration_ms,
            "pipeline completed"
        );
        self.event_sink
            .emit(
                PIPELINE_COMPLETED,
                Some(serde_json::json!({
                    "pipeline": self.name,
                    "run_id": run_id,
                    "duration_ms": duration_ms,
                    "summary": summary,
                })),
            )
            .await;

        (state, summary)
    }
}
