//! Protocol traits for websearch components.
//!
//! Stages depend on these traits rather than on the HTTP clients, so a run
//! can be driven by canned results in tests.

use async_trait::async_trait;

use super::models::SearchHit;

/// Protocol for web search.
///
/// Implementations never fail: when the backing service is unreachable or
/// unconfigured they return placeholder results instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns up to `num_results` hits for `query`.
    async fn search(&self, query: &str, num_results: usize) -> Vec<SearchHit>;
}

/// Protocol for fetching a page and reducing it to visible text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageScraper: Send + Sync {
    /// Returns cleaned text of `url`, or `None` when it could not be fetched.
    async fn scrape(&self, url: &str) -> Option<String>;
}
