//! Market research: competitors, audience and positioning.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;

use super::agent::{apply_outcome, StageAgent};
use super::Stage;
use crate::core::{MarketResearch, PipelineState, StageKind};
use crate::utils::take_chars;
use crate::websearch::{
    company_url, competitor_query, target_audience_query, PageScraper, SearchHit, SearchProvider,
};

const SYSTEM_PROMPT: &str = r#"You are a senior market analyst. You study companies, their competitors and the people who buy from them.
Using the company details, the search results and the company website text, produce:

1. Customer profile: background, products and services, market position
2. Competitors: the main competitors with strengths, weaknesses and differentiation
3. Target audience: demographics, preferences, pain points, behavior
4. Market positioning: how the company presents itself in its market

Answer with JSON of exactly this shape:

{
  "customer_profile": {
    "company_name": "string",
    "industry": "string",
    "products_services": "string",
    "market_position": "string"
  },
  "competitors": [
    {
      "name": "string",
      "strengths": "string",
      "weaknesses": "string",
      "differentiation": "string"
    }
  ],
  "target_audience": {
    "demographics": "string",
    "preferences": "string",
    "pain_points": "string",
    "behavior": "string"
  },
  "market_positioning": "string"
}

Reply with the JSON object only. No Markdown, no commentary."#;

/// Results requested per search query.
const SEARCH_RESULTS: usize = 5;
/// Hits of each query shown in the prompt.
const HITS_IN_PROMPT: usize = 3;
/// Characters of the description used in the audience query.
const AUDIENCE_QUERY_CHARS: usize = 100;

/// Shown when the company site could not be scraped.
pub const NO_SITE_CONTENT: &str = "No content available";

/// Web material gathered before the model call.
#[derive(Debug, Clone, Default)]
pub struct ResearchContext {
    /// Hits for the competitor query.
    pub competitor_hits: Vec<SearchHit>,
    /// Hits for the audience query.
    pub audience_hits: Vec<SearchHit>,
    /// Visible text of the company site.
    pub site_content: Option<String>,
}

/// First stage: researches the company and its market.
pub struct MarketResearchStage {
    agent: StageAgent,
    search: Arc<dyn SearchProvider>,
    scraper: Arc<dyn PageScraper>,
}

impl std::fmt::Debug for MarketResearchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketResearchStage")
            .field("agent", &self.agent)
            .finish_non_exhaustive()
    }
}

impl MarketResearchStage {
    /// Creates the stage.
    #[must_use]
    pub fn new(agent: StageAgent, search: Arc<dyn SearchProvider>, scraper: Arc<dyn PageScraper>) -> Self {
        Self { agent, search, scraper }
    }

    /// Runs the two searches and the site scrape, one after another.
    pub async fn gather(&self, state: &PipelineState) -> ResearchContext {
        let competitor_hits = self
            .search
            .search(&competitor_query(&state.company_domain, &state.industry), SEARCH_RESULTS)
            .await;
        let audience_hits = self
            .search
            .search(
                &target_audience_query(
                    &state.industry,
                    take_chars(&state.project_description, AUDIENCE_QUERY_CHARS),
                ),
                SEARCH_RESULTS,
            )
            .await;
        let site_content = self.scraper.scrape(&company_url(&state.company_domain)).await;

        ResearchContext {
            competitor_hits,
            audience_hits,
            site_content,
        }
    }
}

/// Numbered `title` / `snippet` lines for the first `limit` hits.
#[must_use]
pub fn format_hits(hits: &[SearchHit], limit: usize) -> String {
    let mut out = String::new();
    for (index, hit) in hits.iter().take(limit).enumerate() {
        let _ = write!(out, "\n{}. {}\n   {}\n", index + 1, hit.title, hit.snippet);
    }
    out
}

/// Competitor and audience hits under their section headers.
#[must_use]
pub fn format_search_results(context: &ResearchContext) -> String {
    format!(
        "=== Competitor Information ===\n{}\n=== Target Audience Information ===\n{}",
        format_hits(&context.competitor_hits, HITS_IN_PROMPT),
        format_hits(&context.audience_hits, HITS_IN_PROMPT),
    )
}

/// The user message sent to the model.
#[must_use]
pub fn user_prompt(state: &PipelineState, context: &ResearchContext) -> String {
    let site_content = context
        .site_content
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_SITE_CONTENT);

    format!(
        "Company Domain: {}\nIndustry: {}\nProject Description: {}\nTarget Market: {}\n\n\
         Search Results:\n{}\n\nCompany Website Content:\n{}\n\n\
         Please provide comprehensive market research analysis.",
        state.company_domain,
        state.industry,
        state.project_description,
        state.target_market_or_default(),
        format_search_results(context),
        site_content,
    )
}

#[async_trait]
impl Stage for MarketResearchStage {
    fn name(&self) -> &str {
        StageKind::MarketResearch.as_str()
    }

    async fn execute(&self, state: PipelineState) -> PipelineState {
        info!(run_id = %state.run_id, domain = %state.company_domain, "starting market research");
        let context = self.gather(&state).await;
        let outcome = self
            .agent
            .generate::<MarketResearch>(SYSTEM_PROMPT, user_prompt(&state, &context))
            .await;
        apply_outcome(state, StageKind::MarketResearch, outcome, |state, record| {
            state.market_research = Some(record);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MarketingInput;
    use crate::providers::ModelSettings;
    use crate::testing::{fixtures, MockLLMProvider};
    use crate::websearch::{MockPageScraper, MockSearchProvider};
    use mockall::predicate::eq;

    fn state() -> PipelineState {
        PipelineState::new(MarketingInput::new(
            "acme.io",
            "SaaS",
            "An analytics platform that helps small retail teams understand their customers better.",
        ))
    }

    fn hits(prefix: &str, n: usize) -> Vec<SearchHit> {
        (1..=n)
            .map(|i| SearchHit::new(format!("{prefix} {i}"), format!("snippet {i}"), ""))
            .collect()
    }

    #[test]
    fn test_search_results_keep_top_three_per_section() {
        let context = ResearchContext {
            competitor_hits: hits("Competitor", 5),
            audience_hits: hits("Audience", 5),
            site_content: None,
        };
        let text = format_search_results(&context);

        assert!(text.starts_with("=== Competitor Information ==="));
        assert!(text.contains("3. Competitor 3"));
        assert!(!text.contains("Competitor 4"));
        assert!(text.contains("=== Target Audience Information ==="));
        assert!(text.contains("\n1. Audience 1\n   snippet 1\n"));
    }

    #[test]
    fn test_prompt_uses_placeholders() {
        let prompt = user_prompt(&state(), &ResearchContext::default());
        assert!(prompt.contains("Target Market: Not specified"));
        assert!(prompt.contains("No content available"));
    }

    #[tokio::test]
    async fn test_execute_gathers_context_and_stores_record() {
        let mut search = MockSearchProvider::new();
        search
            .expect_search()
            .with(eq("SaaS companies competitors of acme.io"), eq(5))
            .times(1)
            .returning(|_, _| vec![SearchHit::new("Rival", "Another analytics tool", "")]);
        search
            .expect_search()
            .withf(|query, n| query.ends_with("target audience demographics") && *n == 5)
            .times(1)
            .returning(|_, _| Vec::new());
        let mut scraper = MockPageScraper::new();
        scraper
            .expect_scrape()
            .with(eq("https://acme.io"))
            .times(1)
            .returning(|_| Some("Acme helps retailers.".to_string()));

        let llm = Arc::new(MockLLMProvider::with_responses([fixtures::MARKET_RESEARCH_JSON]));
        let stage = MarketResearchStage::new(
            StageAgent::new(llm.clone(), ModelSettings::new("gpt-4o-mini", 0.3)),
            Arc::new(search),
            Arc::new(scraper),
        );

        let state = stage.execute(state()).await;

        assert_eq!(state.current_step, "market_research_completed");
        assert!(state.market_research.is_some());
        let prompt = llm.last_user_prompt().unwrap();
        assert!(prompt.contains("1. Rival"));
        assert!(prompt.contains("Acme helps retailers."));
        assert_eq!(llm.requests()[0].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_audience_query_uses_first_hundred_chars() {
        let long_description = "x".repeat(150);
        let mut search = MockSearchProvider::new();
        search
            .expect_search()
            .withf(|query, _| query.contains("competitors"))
            .returning(|_, _| Vec::new());
        search
            .expect_search()
            .withf(|query, _| query == format!("SaaS {} target audience demographics", "x".repeat(100)))
            .times(1)
            .returning(|_, _| Vec::new());
        let mut scraper = MockPageScraper::new();
        scraper.expect_scrape().returning(|_| None);

        let stage = MarketResearchStage::new(
            StageAgent::new(Arc::new(MockLLMProvider::new()), ModelSettings::new("m", 0.3)),
            Arc::new(search),
            Arc::new(scraper),
        );
        let state = PipelineState::new(MarketingInput::new("acme.io", "SaaS", long_description));
        let context = stage.gather(&state).await;

        assert!(context.site_content.is_none());
    }

    #[tokio::test]
    async fn test_malformed_output_sets_error_only() {
        let mut search = MockSearchProvider::new();
        search.expect_search().returning(|_, _| Vec::new());
        let mut scraper = MockPageScraper::new();
        scraper.expect_scrape().returning(|_| None);

        let stage = MarketResearchStage::new(
            StageAgent::new(
                Arc::new(MockLLMProvider::with_responses(["not json at all"])),
                ModelSettings::new("m", 0.3),
            ),
            Arc::new(search),
            Arc::new(scraper),
        );
        let state = stage.execute(state()).await;

        assert_eq!(state.current_step, "market_research_failed");
        assert!(state.market_research.is_none());
        assert!(state.error.as_deref().unwrap().starts_with("Market research failed: "));
    }
}
