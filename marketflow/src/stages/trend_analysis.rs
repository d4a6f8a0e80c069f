//! Trend analysis: market, technology and consumer trends.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;

use super::agent::{apply_outcome, StageAgent};
use super::market_research::format_hits;
use super::Stage;
use crate::core::{MarketResearch, PipelineState, StageKind, TrendAnalysis, NOT_AVAILABLE};
use crate::websearch::{market_trends_query, SearchProvider};

const SYSTEM_PROMPT: &str = r#"You are a trend analyst who tracks markets and forecasts where they are heading.
From the market research and the search results, identify:

1. Market trends: industry growth, market dynamics, emerging segments
2. Technology trends: new technologies, digital transformation, innovation
3. Consumer trends: changing behavior, shifting preferences, new demands
4. Trend impact: what these trends mean for this business
5. Opportunities: gaps and growth areas the trends open up

Answer with JSON of exactly this shape:

{
  "market_trends": ["Trend 1", "Trend 2", "Trend 3"],
  "tech_trends": ["Tech trend 1", "Tech trend 2", "Tech trend 3"],
  "consumer_trends": ["Consumer trend 1", "Consumer trend 2", "Consumer trend 3"],
  "trend_impact": "How the trends affect the business and its positioning",
  "opportunities": ["Opportunity 1", "Opportunity 2", "Opportunity 3"]
}

Reply with the JSON object only. No Markdown, no commentary."#;

const SEARCH_RESULTS: usize = 5;
const COMPETITORS_IN_SUMMARY: usize = 3;

/// Shown when the research record is absent.
pub const NO_MARKET_RESEARCH: &str = "No market research available";

/// Second stage: spots trends and opportunities.
pub struct TrendAnalysisStage {
    agent: StageAgent,
    search: Arc<dyn SearchProvider>,
}

impl std::fmt::Debug for TrendAnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendAnalysisStage")
            .field("agent", &self.agent)
            .finish_non_exhaustive()
    }
}

impl TrendAnalysisStage {
    /// Creates the stage.
    #[must_use]
    pub fn new(agent: StageAgent, search: Arc<dyn SearchProvider>) -> Self {
        Self { agent, search }
    }
}

/// Research summary: customer, audience and top competitors.
#[must_use]
pub fn summarize_research(research: Option<&MarketResearch>) -> String {
    let Some(research) = research else {
        return NO_MARKET_RESEARCH.to_string();
    };

    let mut out = format!(
        "Customer: {}\nIndustry: {}\nMarket Position: {}\n\n\
         Target Audience:\n- Demographics: {}\n- Preferences: {}\n- Pain Points: {}\n\n\
         Top Competitors:\n",
        research.profile("company_name"),
        research.profile("industry"),
        research.profile("market_position"),
        research.audience("demographics"),
        research.audience("preferences"),
        research.audience("pain_points"),
    );
    for competitor in research.top_competitors(COMPETITORS_IN_SUMMARY) {
        let _ = writeln!(
            out,
            "- {}: {}",
            competitor.get("name").map_or(NOT_AVAILABLE, String::as_str),
            competitor.get("differentiation").map_or(NOT_AVAILABLE, String::as_str),
        );
    }
    out
}

/// The user message sent to the model.
#[must_use]
pub fn user_prompt(state: &PipelineState, trend_hits: &str) -> String {
    format!(
        "Industry: {}\nCompany Domain: {}\n\nMarket Research Results:\n{}\n\n\
         Trend Search Results:\n{}\n\n\
         Please provide comprehensive trend analysis and identify opportunities.",
        state.industry,
        state.company_domain,
        summarize_research(state.market_research.as_ref()),
        trend_hits,
    )
}

#[async_trait]
impl Stage for TrendAnalysisStage {
    fn name(&self) -> &str {
        StageKind::TrendAnalysis.as_str()
    }

    async fn execute(&self, state: PipelineState) -> PipelineState {
        info!(run_id = %state.run_id, industry = %state.industry, "starting trend analysis");
        let hits = self
            .search
            .search(&market_trends_query(&state.industry), SEARCH_RESULTS)
            .await;
        let prompt = user_prompt(&state, &format_hits(&hits, SEARCH_RESULTS));
        let outcome = self.agent.generate::<TrendAnalysis>(SYSTEM_PROMPT, prompt).await;
        apply_outcome(state, StageKind::TrendAnalysis, outcome, |state, record| {
            state.trend_analysis = Some(record);
        })
    }
}
