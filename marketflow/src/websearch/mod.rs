//! Web search and page scraping.
//!
//! This module provides:
//! - A search client with simulated fallback results
//! - A scraper that reduces pages to visible text
//! - Query builders used by the research stages
//! - Protocol traits so stages can run against canned data

mod config;
mod extract;
mod models;
mod protocols;
mod scrape;
mod search;

pub use config::{ScrapeConfig, SearchConfig};
pub use extract::{clean_whitespace, visible_text};
pub use models::{company_url, competitor_query, market_trends_query, target_audience_query, SearchHit};
pub use protocols::{PageScraper, SearchProvider};
#[cfg(test)]
pub use protocols::{MockPageScraper, MockSearchProvider};
pub use scrape::WebScraper;
pub use search::{simulated_results, WebSearchClient};
