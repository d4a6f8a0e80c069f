//! Web search client backed by the Serper API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::config::SearchConfig;
use super::models::SearchHit;
use super::protocols::SearchProvider;
use crate::errors::{MarketflowError, Result};

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
}

/// Search client that falls back to simulated results.
#[derive(Debug, Clone)]
pub struct WebSearchClient {
    config: SearchConfig,
    client: Client,
}

impl WebSearchClient {
    /// Creates a client from `config`.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| MarketflowError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    async fn search_remote(&self, api_key: &str, query: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("X-API-KEY", api_key)
            .json(&SerperRequest { q: query, num: num_results })
            .send()
            .await?
            .error_for_status()?;

        let body: SerperResponse = response.json().await?;
        let mut hits = body.organic;
        hits.truncate(num_results);
        Ok(hits)
    }
}

#[async_trait]
impl SearchProvider for WebSearchClient {
    async fn search(&self, query: &str, num_results: usize) -> Vec<SearchHit> {
        let num_results = num_results.max(1);

        let Some(api_key) = self.config.api_key.as_deref().filter(|_| self.config.has_api_key()) else {
            warn!(query, "no search API key configured, using simulated results");
            return simulated_results(query, num_results, self.config.simulated_results_cap);
        };

        match self.search_remote(api_key, query, num_results).await {
            Ok(hits) => {
                debug!(query, hits = hits.len(), "search completed");
                hits
            }
            Err(e) => {
                error!(query, error = %e, "search failed, using simulated results");
                simulated_results(query, num_results, self.config.simulated_results_cap)
            }
        }
    }
}

/// Placeholder hits returned when no real search is possible.
///
/// Returns `min(num_results, cap)` copies of the same hit, at least one.
#[must_use]
pub fn simulated_results(query: &str, num_results: usize, cap: usize) -> Vec<SearchHit> {
    let count = num_results.max(1).min(cap.max(1));
    let hit = SearchHit::new(
        format!("Search result for: {query}"),
        format!(
            "Simulated search result for '{query}'. Configure a search API key for real results."
        ),
        format!("https://example.com/search?q={}", query.replace(' ', "+")),
    );
    vec![hit; count]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WebSearchClient {
        let config = SearchConfig::new()
            .with_api_key("test-key")
            .with_endpoint(format!("{}/search", server.uri()))
            .with_timeout(2.0);
        WebSearchClient::new(config).unwrap()
    }

    #[test]
    fn test_simulated_results_are_capped() {
        let hits = simulated_results("fintech trends", 5, 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].link, "https://example.com/search?q=fintech+trends");
        assert!(hits[0].title.contains("fintech trends"));
    }

    #[test]
    fn test_simulated_results_clamp_zero_to_one() {
        assert_eq!(simulated_results("q", 0, 3).len(), 1);
        assert_eq!(simulated_results("q", 2, 3).len(), 2);
    }

    #[tokio::test]
    async fn test_search_without_key_is_simulated() {
        let client = WebSearchClient::new(SearchConfig::default()).unwrap();
        let hits = client.search("saas competitors", 5).await;
        assert_eq!(hits.len(), 3);
        assert!(hits[0].snippet.contains("Simulated"));
    }

    #[tokio::test]
    async fn test_search_maps_organic_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("X-API-KEY", "test-key"))
            .and(body_json(serde_json::json!({"q": "acme", "num": 2})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organic": [
                    {"title": "One", "snippet": "first", "link": "https://one.example"},
                    {"title": "Two", "link": "https://two.example"},
                    {"title": "Three", "snippet": "third", "link": "https://three.example"}
                ]
            })))
            .mount(&server)
            .await;

        let hits = client_for(&server).search("acme", 2).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].snippet, "first");
        assert_eq!(hits[1].snippet, "");
    }

    #[tokio::test]
    async fn test_search_failure_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let hits = client_for(&server).search("acme", 5).await;
        assert_eq!(hits.len(), 3);
        assert!(hits[0].link.starts_with("https://example.com/search?q="));
    }

    #[tokio::test]
    async fn test_missing_organic_key_yields_no_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        assert!(client_for(&server).search("acme", 5).await.is_empty());
    }
}
