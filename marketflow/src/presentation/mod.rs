//! Presentation layer: form validation, presets and report rendering.
//!
//! A front end collects a [`MarketingInput`], hands it to [`run_analysis`]
//! and renders the returned state with [`render`].

mod form;
mod presets;
mod report;

pub use form::{
    is_listed_industry, validate_input, DEFAULT_INDUSTRY, INDUSTRY_OPTIONS, MIN_DESCRIPTION_CHARS,
};
pub use presets::{find_preset, load_presets, parse_presets, Preset, DEFAULT_PRESETS_PATH};
pub use report::{
    campaign_section, market_research_section, render, render_error_banner, render_json,
    render_markdown, strategy_section, trend_analysis_section, ReportFormat,
};

use tracing::{info, warn};

use crate::core::{MarketingInput, PipelineState};
use crate::errors::Result;
use crate::pipeline::Pipeline;

/// Validates `input` and runs `pipeline` on it once.
///
/// Stage failures do not make this return an error; they are left on the
/// returned state for the report to show.
///
/// # Errors
///
/// Returns [`crate::errors::MarketflowError::Validation`] before any stage
/// runs if the input is rejected.
pub async fn run_analysis(pipeline: &Pipeline, input: MarketingInput) -> Result<PipelineState> {
    validate_input(&input)?;
    if !is_listed_industry(&input.industry) {
        warn!(industry = %input.industry, "industry is not one of the listed options");
    }

    info!(
        pipeline = pipeline.name(),
        company_domain = %input.company_domain,
        industry = %input.industry,
        "starting analysis"
    );
    let state = pipeline.run_input(input).await;
    if let Some(error) = &state.error {
        warn!(run_id = %state.run_id, error = %error, "analysis finished with an error");
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PipelineConfig, StageModels};
    use crate::errors::MarketflowError;
    use crate::events::NoOpEventSink;
    use crate::pipeline::{build_marketing_pipeline, MarketingClients};
    use crate::testing::{fixtures, MockLLMProvider, StaticScraper, StaticSearch};
    use std::sync::Arc;

    fn pipeline(llm: Arc<MockLLMProvider>) -> Pipeline {
        let clients = MarketingClients {
            llm,
            search: Arc::new(StaticSearch::new(Vec::new())),
            scraper: Arc::new(StaticScraper::unreachable()),
        };
        build_marketing_pipeline(
            &clients,
            &StageModels::default(),
            &PipelineConfig::default(),
            Arc::new(NoOpEventSink),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_the_model() {
        let llm = Arc::new(MockLLMProvider::with_responses(fixtures::stage_responses()));
        let input = MarketingInput::new("acme.io", "SaaS", "Too short.");

        let err = run_analysis(&pipeline(llm.clone()), input).await.unwrap_err();

        assert!(matches!(err, MarketflowError::Validation(_)));
        assert_eq!(err.to_string(), "Project description should be at least 50 characters");
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_input_runs_once() {
        let llm = Arc::new(MockLLMProvider::with_responses(fixtures::stage_responses()));

        let state = run_analysis(&pipeline(llm.clone()), fixtures::sample_input())
            .await
            .unwrap();

        assert!(state.is_complete());
        assert_eq!(llm.call_count(), 4);
        assert!(llm.requests()[0]
            .user_prompt()
            .unwrap()
            .contains(crate::stages::NO_SITE_CONTENT));
    }
}
