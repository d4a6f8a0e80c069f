//! Stage trait and the four marketing stages.
//!
//! Each stage receives the accumulated [`PipelineState`] by value, writes only
//! its own record, and hands the state back. A stage never returns an error:
//! failures are recorded on the state and the next stage still runs.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::core::PipelineState;

mod agent;
mod content_creation;
mod market_research;
mod response;
mod strategy_planning;
mod trend_analysis;

pub use agent::StageAgent;
pub use content_creation::{ContentCreationStage, NO_AUDIENCE, NO_MARKETING_STRATEGY};
pub use market_research::{format_hits, MarketResearchStage, ResearchContext, NO_SITE_CONTENT};
pub use response::{parse_stage_output, strip_code_fences};
pub use strategy_planning::{StrategyPlanningStage, NO_TREND_ANALYSIS};
pub use trend_analysis::{TrendAnalysisStage, NO_MARKET_RESEARCH};

/// Trait for pipeline stages.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Executes the stage.
    ///
    /// # Arguments
    ///
    /// * `state` - The state produced by the previous stage
    ///
    /// # Returns
    ///
    /// The state with this stage's record or error marker applied. The
    /// runner counts the stage as failed when `current_step` ends in
    /// `{name}_failed` or when the stage sets a new `error`.
    async fn execute(&self, state: PipelineState) -> PipelineState;
}

/// A simple function-based stage.
pub struct FnStage<F>
where
    F: Fn(PipelineState) -> PipelineState + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnStage<F>
where
    F: Fn(PipelineState) -> PipelineState + Send + Sync,
{
    /// Creates a new function-based stage.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnStage<F>
where
    F: Fn(PipelineState) -> PipelineState + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStage").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F> Stage for FnStage<F>
where
    F: Fn(PipelineState) -> PipelineState + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, state: PipelineState) -> PipelineState {
        (self.func)(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_fn_stage() {
        let stage = FnStage::new("rename", |mut state: PipelineState| {
            state.industry = "Retail".to_string();
            state
        });

        assert_eq!(stage.name(), "rename");
        let state = stage.execute(fixtures::sample_state()).await;
        assert_eq!(state.industry, "Retail");
    }

    #[test]
    fn test_fn_stage_debug() {
        let stage = FnStage::new("noop", |state: PipelineState| state);
        assert!(format!("{stage:?}").contains("noop"));
    }
}
