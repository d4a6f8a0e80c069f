//! Pipeline builder with validation.

use std::fmt;
use std::sync::Arc;

use super::failure_tolerance::FailureMode;
use super::runner::Pipeline;
use crate::errors::{ContractErrorInfo, PipelineValidationError};
use crate::events::{EventSink, NoOpEventSink};
use crate::stages::Stage;

/// Builder for creating validated pipelines.
///
/// Stages run in the order they are added.
pub struct PipelineBuilder {
    name: String,
    stages: Vec<Arc<dyn Stage>>,
    failure_mode: FailureMode,
    event_sink: Arc<dyn EventSink>,
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("name", &self.name)
            .field("stages", &self.stage_names())
            .field("failure_mode", &self.failure_mode)
            .finish_non_exhaustive()
    }
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            failure_mode: FailureMode::default(),
            event_sink: Arc::new(NoOpEventSink),
        }
    }

    /// Appends a stage.
    ///
    /// # Errors
    ///
    /// Returns an error if a stage with the same name was already added.
    pub fn stage(mut self, stage: Arc<dyn Stage>) -> Result<Self, PipelineValidationError> {
        let name = stage.name().to_string();
        if self.stages.iter().any(|existing| existing.name() == name) {
            return Err(PipelineValidationError::new(format!(
                "Stage '{name}' is already part of pipeline '{}'",
                self.name
            ))
            .with_stages(vec![name.clone()])
            .with_error_info(
                ContractErrorInfo::new(
                    "CONTRACT-004-DUPLICATE",
                    format!("Duplicate stage '{name}'"),
                )
                .with_fix_hint("Give every stage a unique name.")
                .with_context_entry("pipeline", self.name.clone()),
            ));
        }

        self.stages.push(stage);
        Ok(self)
    }

    /// Sets how failures are handled.
    #[must_use]
    pub fn failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Sets the sink that receives run events.
    #[must_use]
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder has no stages.
    pub fn build(self) -> Result<Pipeline, PipelineValidationError> {
        if self.stages.is_empty() {
            return Err(PipelineValidationError::new("Pipeline has no stages")
                .with_error_info(
                    ContractErrorInfo::new("CONTRACT-004-EMPTY", "Cannot build an empty pipeline")
                        .with_fix_hint("Add at least one stage to the pipeline before building."),
                ));
        }

        Ok(Pipeline::new(
            self.name,
            self.stages,
            self.failure_mode,
            self.event_sink,
        ))
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}
