//! Pipeline input and the state threaded through the stages.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use super::records::{CampaignContent, MarketResearch, MarketingStrategy, TrendAnalysis};
use super::status::StageKind;

/// Step label of a state no stage has touched yet.
pub const INITIAL_STEP: &str = "initialized";

/// Placeholder used when no target market was given.
pub const TARGET_MARKET_UNSPECIFIED: &str = "Not specified";

/// The four form fields a run starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingInput {
    /// Company domain or name.
    pub company_domain: String,
    /// Industry sector.
    pub industry: String,
    /// Free-text project description.
    pub project_description: String,
    /// Optional target market.
    #[serde(default)]
    pub target_market: Option<String>,
}

impl MarketingInput {
    /// Creates an input without a target market.
    #[must_use]
    pub fn new(
        company_domain: impl Into<String>,
        industry: impl Into<String>,
        project_description: impl Into<String>,
    ) -> Self {
        Self {
            company_domain: company_domain.into(),
            industry: industry.into(),
            project_description: project_description.into(),
            target_market: None,
        }
    }

    /// Sets the target market. Blank values are treated as absent.
    #[must_use]
    pub fn with_target_market(mut self, target_market: impl Into<String>) -> Self {
        let target_market = target_market.into();
        self.target_market = (!target_market.trim().is_empty()).then_some(target_market);
        self
    }
}

/// The record threaded through all four stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    /// Identifier of this run, for logs and events.
    pub run_id: String,

    /// Company domain or name.
    pub company_domain: String,
    /// Industry sector.
    pub industry: String,
    /// Project description.
    pub project_description: String,
    /// Optional target market.
    pub target_market: Option<String>,

    /// Set by the market research stage.
    pub market_research: Option<MarketResearch>,
    /// Set by the trend analysis stage.
    pub trend_analysis: Option<TrendAnalysis>,
    /// Set by the strategy planning stage.
    pub marketing_strategy: Option<MarketingStrategy>,
    /// Set by the content creation stage.
    pub campaign_content: Option<CampaignContent>,

    /// Label of the last step taken.
    pub current_step: String,
    /// Message of the most recent stage failure.
    pub error: Option<String>,
}

impl PipelineState {
    /// Creates a fresh state for `input`.
    #[must_use]
    pub fn new(input: MarketingInput) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            company_domain: input.company_domain,
            industry: input.industry,
            project_description: input.project_description,
            target_market: input.target_market,
            market_research: None,
            trend_analysis: None,
            marketing_strategy: None,
            campaign_content: None,
            current_step: INITIAL_STEP.to_string(),
            error: None,
        }
    }

    /// Target market, or "Not specified".
    #[must_use]
    pub fn target_market_or_default(&self) -> &str {
        self.target_market
            .as_deref()
            .filter(|market| !market.trim().is_empty())
            .unwrap_or(TARGET_MARKET_UNSPECIFIED)
    }

    /// Marks `stage` as completed.
    pub fn advance(&mut self, stage: StageKind) {
        self.current_step = stage.completed_step();
    }

    /// Marks `stage` as failed with `reason`.
    ///
    /// Records of other stages are left untouched.
    pub fn record_failure(&mut self, stage: StageKind, reason: impl Display) {
        self.error = Some(format!("{} failed: {reason}", stage.display_name()));
        self.current_step = stage.failed_step();
    }

    /// True when the last step taken was a failure.
    #[must_use]
    pub fn last_step_failed(&self) -> bool {
        self.current_step.ends_with("_failed")
    }

    /// True when the error marker is set.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when all four records are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.market_research.is_some()
            && self.trend_analysis.is_some()
            && self.marketing_strategy.is_some()
            && self.campaign_content.is_some()
    }

    /// Whether the record owned by `stage` is present.
    #[must_use]
    pub fn has_record(&self, stage: StageKind) -> bool {
        match stage {
            StageKind::MarketResearch => self.market_research.is_some(),
            StageKind::TrendAnalysis => self.trend_analysis.is_some(),
            StageKind::StrategyPlanning => self.marketing_strategy.is_some(),
            StageKind::ContentCreation => self.campaign_content.is_some(),
        }
    }
}

impl From<MarketingInput> for PipelineState {
    fn from(input: MarketingInput) -> Self {
        Self::new(input)
    }
}
