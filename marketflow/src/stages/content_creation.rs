//! Content creation: campaign ideas and matching copy.

use async_trait::async_trait;
use tracing::info;

use super::agent::{apply_outcome, StageAgent};
use super::Stage;
use crate::core::{CampaignContent, MarketResearch, MarketingStrategy, PipelineState, StageKind};
use crate::utils::bullet_list;

const SYSTEM_PROMPT: &str = r#"You are a creative director who writes campaigns people remember.
From the marketing strategy, create:

1. Five campaign ideas that fit the strategy, each aimed at a clear audience on a suitable channel
2. Five marketing copies, one per campaign, each with a strong headline and a persuasive body ending in a call to action

Give every campaign a short unique "id" and set each copy's "campaign_id" to the id of the campaign it was written for.

Answer with JSON of exactly this shape:

{
  "campaign_ideas": [
    {
      "id": "campaign-1",
      "name": "Campaign name",
      "description": "Concept and how it is executed",
      "audience": "Target audience segment",
      "channel": "Primary channel, e.g. Social Media, Email, Content Marketing"
    }
  ],
  "copies": [
    {
      "campaign_id": "campaign-1",
      "title": "Headline",
      "body": "Two or three sentences with the value proposition and a call to action."
    }
  ]
}

Return exactly five campaign ideas and five copies.
Reply with the JSON object only. No Markdown, no commentary."#;

/// Shown when the strategy record is absent.
pub const NO_MARKETING_STRATEGY: &str = "No marketing strategy available";

/// Shown when there is no audience to describe.
pub const NO_AUDIENCE: &str = "No audience information available";

/// Fourth stage: writes campaigns and copy.
#[derive(Debug)]
pub struct ContentCreationStage {
    agent: StageAgent,
}

impl ContentCreationStage {
    /// Creates the stage.
    #[must_use]
    pub fn new(agent: StageAgent) -> Self {
        Self { agent }
    }
}

/// Strategy summary: name and bullet lists.
#[must_use]
pub fn summarize_strategy(strategy: Option<&MarketingStrategy>) -> String {
    let Some(strategy) = strategy else {
        return NO_MARKETING_STRATEGY.to_string();
    };

    format!(
        "Strategy Name: {}\n\nGoals:\n{}\n\nTactics:\n{}\n\nChannels:\n{}\n\nKPIs:\n{}",
        strategy.name,
        bullet_list(&strategy.goals),
        bullet_list(&strategy.tactics),
        bullet_list(&strategy.channels),
        bullet_list(&strategy.kpis),
    )
}

/// Audience summary taken from the research record.
#[must_use]
pub fn summarize_audience(research: Option<&MarketResearch>) -> String {
    let Some(research) = research else {
        return NO_AUDIENCE.to_string();
    };

    format!(
        "Demographics: {}\nPreferences: {}\nPain Points: {}\nBehavior: {}",
        research.audience("demographics"),
        research.audience("preferences"),
        research.audience("pain_points"),
        research.audience("behavior"),
    )
}

/// The user message sent to the model.
#[must_use]
pub fn user_prompt(state: &PipelineState) -> String {
    format!(
        "Project Description: {}\n\nMarketing Strategy:\n{}\n\nTarget Audience:\n{}\n\n\
         Please create 5 innovative campaign ideas and compelling marketing copies.",
        state.project_description,
        summarize_strategy(state.marketing_strategy.as_ref()),
        summarize_audience(state.market_research.as_ref()),
    )
}

#[async_trait]
impl Stage for ContentCreationStage {
    fn name(&self) -> &str {
        StageKind::ContentCreation.as_str()
    }

    async fn execute(&self, state: PipelineState) -> PipelineState {
        info!(run_id = %state.run_id, "starting content creation");
        let outcome = self
            .agent
            .generate::<CampaignContent>(SYSTEM_PROMPT, user_prompt(&state))
            .await
            .map(|mut content| {
                content.link_identifiers();
                content
            });
        apply_outcome(state, StageKind::ContentCreation, outcome, |state, record| {
            state.campaign_content = Some(record);
        })
    }
}
