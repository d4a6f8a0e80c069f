//! Canned inputs and model replies.
//!
//! The JSON constants are valid replies for each stage, in stage order, so
//! they can be queued on a [`super::MockLLMProvider`] for a full run.

use crate::core::{
    CampaignContent, MarketResearch, MarketingInput, MarketingStrategy, PipelineState,
    TrendAnalysis,
};

/// Valid market research reply with four competitors.
pub const MARKET_RESEARCH_JSON: &str = r#"{
  "customer_profile": {
    "company_name": "Acme Analytics",
    "industry": "SaaS",
    "products_services": "Customer analytics dashboards for small retailers",
    "market_position": "Affordable challenger"
  },
  "competitors": [
    {"name": "Northwind Insights", "strengths": "Brand", "weaknesses": "Price", "differentiation": "Enterprise focus"},
    {"name": "Contoso Metrics", "strengths": "Integrations", "weaknesses": "Complex setup", "differentiation": "Data warehouse first"},
    {"name": "Fabrikam BI", "strengths": "Templates", "weaknesses": "Slow support", "differentiation": "Self-serve reports"},
    {"name": "Tailspin Data", "strengths": "Free tier", "weaknesses": "Limited exports", "differentiation": "Freemium"}
  ],
  "target_audience": {
    "demographics": "Owners of retail shops with 5 to 50 staff",
    "preferences": "Simple tools with quick setup",
    "pain_points": "No time to analyse sales data",
    "behavior": "Research software through peer reviews"
  },
  "market_positioning": "The analytics tool a shop owner can set up in an afternoon"
}"#;

/// Valid trend analysis reply.
pub const TREND_ANALYSIS_JSON: &str = r#"{
  "market_trends": ["Retail analytics spend is growing", "Consolidation among vendors", "Vertical SaaS gains share"],
  "tech_trends": ["Generative summaries of dashboards", "Embedded analytics in POS systems", "Real-time inventory signals"],
  "consumer_trends": ["Owners expect mobile-first tools", "Preference for monthly billing", "Trust in peer reviews"],
  "trend_impact": "Small retailers now expect insights without hiring analysts, which favours simple products.",
  "opportunities": ["POS marketplace listings", "Automated weekly reports", "Partnerships with retail associations"]
}"#;

/// Valid strategy reply.
pub const MARKETING_STRATEGY_JSON: &str = r#"{
  "name": "Insights in an Afternoon",
  "goals": ["Reach 1,000 trial signups in two quarters", "Convert 20% of trials", "Lift brand search volume by 50%"],
  "tactics": ["Publish setup walkthrough videos", "Run webinars with retail associations", "Offer a POS integration bundle", "Collect and promote case studies"],
  "channels": ["YouTube", "LinkedIn", "POS marketplaces"],
  "KPIs": ["Trial signups", "Trial-to-paid conversion", "Cost per acquisition", "Branded search volume"]
}"#;

/// Valid content reply with explicit identifiers.
pub const CAMPAIGN_CONTENT_JSON: &str = r#"{
  "campaign_ideas": [
    {"id": "afternoon-setup", "name": "Afternoon Setup Challenge", "description": "Film real owners setting up Acme in one afternoon.", "audience": "Shop owners", "channel": "YouTube"},
    {"id": "peer-stories", "name": "Peer Stories", "description": "Case studies told by retailers.", "audience": "Review-driven buyers", "channel": "LinkedIn"},
    {"id": "pos-bundle", "name": "POS Bundle", "description": "Discounted bundle in POS marketplaces.", "audience": "POS users", "channel": "Marketplaces"},
    {"id": "weekly-digest", "name": "Weekly Digest", "description": "Free automated weekly sales digest.", "audience": "Busy owners", "channel": "Email"},
    {"id": "association-webinars", "name": "Association Webinars", "description": "Webinars co-hosted with retail associations.", "audience": "Association members", "channel": "Webinars"}
  ],
  "copies": [
    {"campaign_id": "pos-bundle", "title": "Your POS, now with answers", "body": "Add Acme to your POS in one click. Start your free trial today."},
    {"campaign_id": "afternoon-setup", "title": "Lunch to insights", "body": "Set up Acme before closing time. Try it free."},
    {"campaign_id": "peer-stories", "title": "Shops like yours", "body": "See how owners grew sales with Acme. Read their stories."},
    {"campaign_id": "weekly-digest", "title": "Monday, sorted", "body": "A weekly sales digest in your inbox. Sign up free."},
    {"campaign_id": "association-webinars", "title": "Learn with your peers", "body": "Join our free webinar with your association. Save your seat."}
  ]
}"#;

/// A description long enough to pass validation.
pub const SAMPLE_DESCRIPTION: &str =
    "Acme builds customer analytics dashboards that help small retail teams understand what sells and why.";

/// Input used across tests.
#[must_use]
pub fn sample_input() -> MarketingInput {
    MarketingInput::new("acme.io", "SaaS", SAMPLE_DESCRIPTION)
}

/// A fresh state for [`sample_input`].
#[must_use]
pub fn sample_state() -> PipelineState {
    PipelineState::new(sample_input())
}

/// Parsed [`MARKET_RESEARCH_JSON`].
///
/// # Panics
///
/// Never; the constant is valid.
#[must_use]
pub fn market_research() -> MarketResearch {
    serde_json::from_str(MARKET_RESEARCH_JSON).expect("fixture is valid")
}

/// Parsed [`TREND_ANALYSIS_JSON`].
#[must_use]
pub fn trend_analysis() -> TrendAnalysis {
    serde_json::from_str(TREND_ANALYSIS_JSON).expect("fixture is valid")
}

/// Parsed [`MARKETING_STRATEGY_JSON`].
#[must_use]
pub fn marketing_strategy() -> MarketingStrategy {
    serde_json::from_str(MARKETING_STRATEGY_JSON).expect("fixture is valid")
}

/// Parsed [`CAMPAIGN_CONTENT_JSON`].
#[must_use]
pub fn campaign_content() -> CampaignContent {
    let mut content: CampaignContent =
        serde_json::from_str(CAMPAIGN_CONTENT_JSON).expect("fixture is valid");
    content.link_identifiers();
    content
}

/// The four replies of a successful run, in stage order.
#[must_use]
pub fn stage_responses() -> [&'static str; 4] {
    [
        MARKET_RESEARCH_JSON,
        TREND_ANALYSIS_JSON,
        MARKETING_STRATEGY_JSON,
        CAMPAIGN_CONTENT_JSON,
    ]
}

/// A state with every record filled in.
#[must_use]
pub fn completed_state() -> PipelineState {
    let mut state = sample_state();
    state.market_research = Some(market_research());
    state.trend_analysis = Some(trend_analysis());
    state.marketing_strategy = Some(marketing_strategy());
    state.campaign_content = Some(campaign_content());
    state.current_step = "content_creation_completed".to_string();
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        assert_eq!(market_research().competitors.len(), 4);
        assert_eq!(trend_analysis().opportunities.len(), 3);
        assert_eq!(marketing_strategy().kpis.len(), 4);
        assert!(campaign_content().orphan_copies().is_empty());
    }

    #[test]
    fn test_completed_state() {
        assert!(completed_state().is_complete());
        assert!(SAMPLE_DESCRIPTION.len() >= 50);
    }
}
