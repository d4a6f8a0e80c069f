//! Typed records produced by the four stages.
//!
//! Every field without a `serde(default)` is required: a model response that
//! omits it fails deserialization, which the stage reports as a schema error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder shown for a missing map entry.
pub const NOT_AVAILABLE: &str = "N/A";

/// String-to-string mapping used by the research record.
pub type Attributes = BTreeMap<String, String>;

/// Looks up `key`, falling back to [`NOT_AVAILABLE`].
#[must_use]
pub fn attribute<'a>(map: &'a Attributes, key: &str) -> &'a str {
    map.get(key).map_or(NOT_AVAILABLE, String::as_str)
}

/// Output of the market research stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketResearch {
    /// `company_name`, `industry`, `products_services`, `market_position`.
    pub customer_profile: Attributes,
    /// One entry per competitor: `name`, `strengths`, `weaknesses`, `differentiation`.
    pub competitors: Vec<Attributes>,
    /// `demographics`, `preferences`, `pain_points`, `behavior`.
    pub target_audience: Attributes,
    /// How the company positions itself.
    pub market_positioning: String,
}

impl MarketResearch {
    /// Customer profile entry or `N/A`.
    #[must_use]
    pub fn profile(&self, key: &str) -> &str {
        attribute(&self.customer_profile, key)
    }

    /// Target audience entry or `N/A`.
    #[must_use]
    pub fn audience(&self, key: &str) -> &str {
        attribute(&self.target_audience, key)
    }

    /// The first `limit` competitors.
    #[must_use]
    pub fn top_competitors(&self, limit: usize) -> &[Attributes] {
        &self.competitors[..self.competitors.len().min(limit)]
    }
}

/// Output of the trend analysis stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Industry growth and market dynamics.
    pub market_trends: Vec<String>,
    /// Emerging technologies.
    pub tech_trends: Vec<String>,
    /// Behavior and preference shifts.
    pub consumer_trends: Vec<String>,
    /// How the trends affect the business.
    pub trend_impact: String,
    /// Gaps and growth areas.
    pub opportunities: Vec<String>,
}

/// Output of the strategy planning stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingStrategy {
    /// Strategy name.
    pub name: String,
    /// Measurable objectives.
    pub goals: Vec<String>,
    /// Concrete actions.
    pub tactics: Vec<String>,
    /// Channels to use.
    pub channels: Vec<String>,
    /// Key performance indicators.
    #[serde(rename = "KPIs")]
    pub kpis: Vec<String>,
}

/// A single campaign concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignIdea {
    /// Identifier the matching [`Copy`] refers to.
    #[serde(default)]
    pub id: String,
    /// Campaign name.
    pub name: String,
    /// Concept and execution.
    pub description: String,
    /// Target audience segment.
    pub audience: String,
    /// Primary channel.
    pub channel: String,
}

/// Marketing copy written for one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Copy {
    /// The [`CampaignIdea::id`] this copy belongs to.
    #[serde(default)]
    pub campaign_id: String,
    /// Headline.
    pub title: String,
    /// Body text with a call to action.
    pub body: String,
}

/// Output of the content creation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignContent {
    /// Campaign ideas.
    pub campaign_ideas: Vec<CampaignIdea>,
    /// Copies, each linked to an idea by `campaign_id`.
    pub copies: Vec<Copy>,
}

impl CampaignContent {
    /// Fills in missing identifiers.
    ///
    /// Ideas without an id get `campaign-<n>` (1-based position). A copy
    /// without a `campaign_id` is linked to the idea at the same position.
    /// This is the only place list position is consulted.
    pub fn link_identifiers(&mut self) {
        for (index, idea) in self.campaign_ideas.iter_mut().enumerate() {
            if idea.id.trim().is_empty() {
                idea.id = format!("campaign-{}", index + 1);
            }
        }
        for (index, copy) in self.copies.iter_mut().enumerate() {
            if copy.campaign_id.trim().is_empty() {
                if let Some(idea) = self.campaign_ideas.get(index) {
                    copy.campaign_id.clone_from(&idea.id);
                }
            }
        }
    }

    /// The copy written for `campaign_id`, if any.
    #[must_use]
    pub fn copy_for(&self, campaign_id: &str) -> Option<&Copy> {
        self.copies.iter().find(|copy| copy.campaign_id == campaign_id)
    }

    /// Every idea with its copy.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&CampaignIdea, Option<&Copy>)> {
        self.campaign_ideas
            .iter()
            .map(|idea| (idea, self.copy_for(&idea.id)))
            .collect()
    }

    /// Copies whose `campaign_id` matches no idea.
    #[must_use]
    pub fn orphan_copies(&self) -> Vec<&Copy> {
        self.copies
            .iter()
            .filter(|copy| !self.campaign_ideas.iter().any(|idea| idea.id == copy.campaign_id))
            .collect()
    }
}
