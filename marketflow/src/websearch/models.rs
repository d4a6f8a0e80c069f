//! Data models for web search results.

use serde::{Deserialize, Serialize};

/// One search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result title.
    #[serde(default)]
    pub title: String,
    /// Text snippet.
    #[serde(default)]
    pub snippet: String,
    /// Result URL.
    #[serde(default)]
    pub link: String,
}

impl SearchHit {
    /// Creates a new search hit.
    #[must_use]
    pub fn new(title: impl Into<String>, snippet: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }
}

/// Query for companies competing with `company_domain`.
#[must_use]
pub fn competitor_query(company_domain: &str, industry: &str) -> String {
    format!("{industry} companies competitors of {company_domain}")
}

/// Query for current trends in `industry`.
#[must_use]
pub fn market_trends_query(industry: &str) -> String {
    format!("{industry} market trends 2024 2025")
}

/// Query for the audience of `product` in `industry`.
#[must_use]
pub fn target_audience_query(industry: &str, product: &str) -> String {
    format!("{industry} {product} target audience demographics")
}

/// Turns a company domain or name into a URL to scrape.
#[must_use]
pub fn company_url(domain: &str) -> String {
    if domain.starts_with("http") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    }
}
