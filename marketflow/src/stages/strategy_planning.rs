//! Strategy planning: goals, tactics, channels and KPIs.

use async_trait::async_trait;
use tracing::info;

use super::agent::{apply_outcome, StageAgent};
use super::trend_analysis::NO_MARKET_RESEARCH;
use super::Stage;
use crate::core::{MarketResearch, MarketingStrategy, PipelineState, StageKind, TrendAnalysis, NOT_AVAILABLE};
use crate::utils::bullet_list;

const SYSTEM_PROMPT: &str = r#"You are a chief marketing strategist. You turn research and trend analysis into a plan a team can execute.
From the market research and trend analysis, write a marketing strategy with:

1. Name: a short, memorable name for the strategy
2. Goals: clear and measurable objectives
3. Tactics: specific actions that reach the goals
4. Channels: where the strategy will run
5. KPIs: indicators that show whether it works

Answer with JSON of exactly this shape:

{
  "name": "Strategy name",
  "goals": ["Goal 1", "Goal 2", "Goal 3"],
  "tactics": ["Tactic 1", "Tactic 2", "Tactic 3", "Tactic 4"],
  "channels": ["Channel 1", "Channel 2", "Channel 3"],
  "KPIs": ["KPI 1", "KPI 2", "KPI 3", "KPI 4"]
}

Goals must follow from the trends and opportunities. Channels must suit the target audience. KPIs must be measurable.
Reply with the JSON object only. No Markdown, no commentary."#;

const COMPETITORS_IN_SUMMARY: usize = 3;

/// Shown when the trend record is absent.
pub const NO_TREND_ANALYSIS: &str = "No trend analysis available";

/// Third stage: plans the marketing strategy.
#[derive(Debug)]
pub struct StrategyPlanningStage {
    agent: StageAgent,
}

impl StrategyPlanningStage {
    /// Creates the stage.
    #[must_use]
    pub fn new(agent: StageAgent) -> Self {
        Self { agent }
    }
}

/// Research summary: profile, audience, positioning and competitor names.
#[must_use]
pub fn summarize_research(research: Option<&MarketResearch>) -> String {
    let Some(research) = research else {
        return NO_MARKET_RESEARCH.to_string();
    };

    let competitors = research
        .top_competitors(COMPETITORS_IN_SUMMARY)
        .iter()
        .map(|competitor| competitor.get("name").map_or(NOT_AVAILABLE, String::as_str))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Customer Profile:\n- Company: {}\n- Products/Services: {}\n- Market Position: {}\n\n\
         Target Audience:\n- Demographics: {}\n- Preferences: {}\n- Pain Points: {}\n\n\
         Market Positioning: {}\n\nKey Competitors: {}",
        research.profile("company_name"),
        research.profile("products_services"),
        research.profile("market_position"),
        research.audience("demographics"),
        research.audience("preferences"),
        research.audience("pain_points"),
        research.market_positioning,
        competitors,
    )
}

/// Trend summary as bullet lists.
#[must_use]
pub fn summarize_trends(trends: Option<&TrendAnalysis>) -> String {
    let Some(trends) = trends else {
        return NO_TREND_ANALYSIS.to_string();
    };

    format!(
        "Market Trends:\n{}\n\nTechnology Trends:\n{}\n\nConsumer Trends:\n{}\n\n\
         Trend Impact: {}\n\nIdentified Opportunities:\n{}",
        bullet_list(&trends.market_trends),
        bullet_list(&trends.tech_trends),
        bullet_list(&trends.consumer_trends),
        trends.trend_impact,
        bullet_list(&trends.opportunities),
    )
}

/// The user message sent to the model.
#[must_use]
pub fn user_prompt(state: &PipelineState) -> String {
    format!(
        "Project Description: {}\nTarget Market: {}\n\n\
         Market Research Summary:\n{}\n\nTrend Analysis Summary:\n{}\n\n\
         Please create a comprehensive marketing strategy that leverages these insights.",
        state.project_description,
        state.target_market_or_default(),
        summarize_research(state.market_research.as_ref()),
        summarize_trends(state.trend_analysis.as_ref()),
    )
}

#[async_trait]
impl Stage for StrategyPlanningStage {
    fn name(&self) -> &str {
        StageKind::StrategyPlanning.as_str()
    }

    async fn execute(&self, state: PipelineState) -> PipelineState {
        info!(run_id = %state.run_id, "starting strategy planning");
        let outcome = self
            .agent
            .generate::<MarketingStrategy>(SYSTEM_PROMPT, user_prompt(&state))
            .await;
        apply_outcome(state, StageKind::StrategyPlanning, outcome, |state, record| {
            state.marketing_strategy = Some(record);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ModelSettings;
    use crate::testing::{fixtures, MockLLMProvider};
    use std::sync::Arc;

    #[test]
    fn test_prompt_placeholders_on_empty_state() {
        let prompt = user_prompt(&fixtures::sample_state());
        assert!(prompt.contains("No market research available"));
        assert!(prompt.contains("No trend analysis available"));
    }

    #[test]
    fn test_summaries_with_records() {
        let research = fixtures::market_research();
        let summary = summarize_research(Some(&research));
        assert!(summary.contains("Key Competitors: Northwind Insights, Contoso Metrics, Fabrikam BI"));

        let trends = fixtures::trend_analysis();
        let summary = summarize_trends(Some(&trends));
        assert!(summary.starts_with("Market Trends:\n- "));
        assert!(summary.contains(&format!("Trend Impact: {}", trends.trend_impact)));
    }

    #[tokio::test]
    async fn test_fenced_output_is_accepted() {
        let llm = Arc::new(MockLLMProvider::with_responses([format!(
            "```json\n{}\n```",
            fixtures::MARKETING_STRATEGY_JSON
        )]));
        let stage = StrategyPlanningStage::new(StageAgent::new(llm.clone(), ModelSettings::new("gpt-4o", 0.5)));

        let state = stage.execute(fixtures::sample_state()).await;

        assert_eq!(state.current_step, "strategy_planning_completed");
        assert_eq!(state.marketing_strategy.unwrap().kpis.len(), 4);
        let requests = llm.requests();
        let request = &requests[0];
        assert_eq!(request.model, "gpt-4o");
        assert!((request.temperature - 0.5).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_provider_failure_is_recorded() {
        let llm = Arc::new(MockLLMProvider::new());
        llm.push_error("connection refused");
        let stage = StrategyPlanningStage::new(StageAgent::new(llm, ModelSettings::new("gpt-4o", 0.5)));

        let state = stage.execute(fixtures::sample_state()).await;

        assert_eq!(state.current_step, "strategy_planning_failed");
        assert!(state.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_missing_kpis_fails_the_stage() {
        let mut strategy: serde_json::Value =
            serde_json::from_str(fixtures::MARKETING_STRATEGY_JSON).unwrap();
        strategy.as_object_mut().unwrap().remove("KPIs");
        let llm = Arc::new(MockLLMProvider::with_responses([strategy.to_string()]));
        let stage = StrategyPlanningStage::new(StageAgent::new(llm, ModelSettings::new("gpt-4o", 0.5)));

        let state = stage.execute(fixtures::sample_state()).await;

        assert_eq!(state.current_step, "strategy_planning_failed");
        assert!(state.error.unwrap().starts_with("Strategy planning failed: "));
        assert!(state.marketing_strategy.is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_fails_the_stage() {
        let llm = Arc::new(MockLLMProvider::with_responses(["Here is your strategy: goals first"]));
        let stage = StrategyPlanningStage::new(StageAgent::new(llm, ModelSettings::new("gpt-4o", 0.5)));

        let state = stage.execute(fixtures::sample_state()).await;

        assert_eq!(state.current_step, "strategy_planning_failed");
        assert!(state.error.is_some());
        assert!(state.marketing_strategy.is_none());
    }
}
