//! The model-calling half shared by every stage.

use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::response::parse_stage_output;
use crate::core::{PipelineState, StageKind};
use crate::errors::StageError;
use crate::providers::{CompletionRequest, LlmProvider, ModelSettings};

/// A model handle bound to one stage's settings.
#[derive(Clone)]
pub struct StageAgent {
    llm: Arc<dyn LlmProvider>,
    settings: ModelSettings,
}

impl fmt::Debug for StageAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageAgent")
            .field("provider", &self.llm.provider_name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl StageAgent {
    /// Creates an agent calling `llm` with `settings`.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>, settings: ModelSettings) -> Self {
        Self { llm, settings }
    }

    /// Sends one system + user exchange and parses the reply into `T`.
    pub async fn generate<T: DeserializeOwned>(&self, system: &str, user: String) -> Result<T, StageError> {
        let request = CompletionRequest::new(&self.settings, system, user);
        let response = self.llm.complete(request).await?;
        debug!(
            model = %response.model,
            tokens = response.total_tokens(),
            "stage response received"
        );
        parse_stage_output(&response.content)
    }
}

/// Applies a stage outcome to `state`.
///
/// On success `store` writes the record and the step advances; on failure
/// only the error marker and step label change.
pub(crate) fn apply_outcome<T>(
    mut state: PipelineState,
    kind: StageKind,
    outcome: Result<T, StageError>,
    store: impl FnOnce(&mut PipelineState, T),
) -> PipelineState {
    match outcome {
        Ok(record) => {
            store(&mut state, record);
            state.advance(kind);
            tracing::info!(run_id = %state.run_id, stage = %kind, "stage completed");
        }
        Err(err) => {
            tracing::error!(
                run_id = %state.run_id,
                stage = %kind,
                kind = err.kind(),
                error = %err,
                "stage failed"
            );
            state.record_failure(kind, &err);
        }
    }
    state
}
