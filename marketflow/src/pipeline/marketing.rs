//! Wiring of the four marketing stages.

use std::sync::Arc;

use super::builder::PipelineBuilder;
use super::runner::Pipeline;
use crate::config::{AppConfig, PipelineConfig, StageModels};
use crate::core::StageKind;
use crate::errors::Result;
use crate::events::EventSink;
use crate::providers::{LlmProvider, OpenAiProvider};
use crate::stages::{
    ContentCreationStage, MarketResearchStage, StageAgent, StrategyPlanningStage,
    TrendAnalysisStage,
};
use crate::websearch::{PageScraper, SearchProvider, WebScraper, WebSearchClient};

/// Client handles shared by the stages of one pipeline.
#[derive(Clone)]
pub struct MarketingClients {
    /// Model provider.
    pub llm: Arc<dyn LlmProvider>,
    /// Web search.
    pub search: Arc<dyn SearchProvider>,
    /// Page scraper.
    pub scraper: Arc<dyn PageScraper>,
}

impl std::fmt::Debug for MarketingClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketingClients")
            .field("llm", &self.llm.provider_name())
            .finish_non_exhaustive()
    }
}

impl MarketingClients {
    /// Builds the HTTP clients described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            llm: Arc::new(OpenAiProvider::new(config.llm.clone())?),
            search: Arc::new(WebSearchClient::new(config.search.clone())?),
            scraper: Arc::new(WebScraper::new(config.scrape.clone())?),
        })
    }
}

/// Assembles market research, trend analysis, strategy planning and content
/// creation, in that order.
///
/// # Errors
///
/// Returns an error only if the stage list is invalid.
pub fn build_marketing_pipeline(
    clients: &MarketingClients,
    models: &StageModels,
    options: &PipelineConfig,
    event_sink: Arc<dyn EventSink>,
) -> Result<Pipeline> {
    let agent = |kind: StageKind| StageAgent::new(clients.llm.clone(), models.for_stage(kind).clone());

    let pipeline = PipelineBuilder::new(options.name.clone())
        .failure_mode(options.failure_mode)
        .event_sink(event_sink)
        .stage(Arc::new(MarketResearchStage::new(
            agent(StageKind::MarketResearch),
            clients.search.clone(),
            clients.scraper.clone(),
        )))?
        .stage(Arc::new(TrendAnalysisStage::new(
            agent(StageKind::TrendAnalysis),
            clients.search.clone(),
        )))?
        .stage(Arc::new(StrategyPlanningStage::new(agent(StageKind::StrategyPlanning))))?
        .stage(Arc::new(ContentCreationStage::new(agent(StageKind::ContentCreation))))?
        .build()?;

    Ok(pipeline)
}

/// Builds clients from `config` and assembles the pipeline.
///
/// # Errors
///
/// Returns an error if a client cannot be constructed.
pub fn pipeline_from_config(config: &AppConfig, event_sink: Arc<dyn EventSink>) -> Result<Pipeline> {
    let clients = MarketingClients::from_config(config)?;
    build_marketing_pipeline(&clients, &config.stages, &config.pipeline, event_sink)
}
