//! Page fetching and text reduction.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use super::config::ScrapeConfig;
use super::extract::visible_text;
use super::protocols::PageScraper;
use crate::errors::{MarketflowError, Result};
use crate::utils::truncate_text;

/// Fetches pages over HTTP and returns their visible text.
#[derive(Debug, Clone)]
pub struct WebScraper {
    config: ScrapeConfig,
    client: Client,
}

impl WebScraper {
    /// Creates a scraper from `config`.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| MarketflowError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Fetches `url` and returns the cleaned, truncated text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let text = visible_text(&html);
        Ok(truncate_text(
            &text,
            self.config.max_length,
            &self.config.truncation_suffix,
        ))
    }
}

#[async_trait]
impl PageScraper for WebScraper {
    async fn scrape(&self, url: &str) -> Option<String> {
        match self.fetch_text(url).await {
            Ok(text) => {
                debug!(url, chars = text.chars().count(), "page scraped");
                Some(text)
            }
            Err(e) => {
                error!(url, error = %e, "scraping failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r"<html><head><script>track()</script></head>
        <body><h1>Acme</h1><p>We build analytics for small teams.</p></body></html>";

    #[tokio::test]
    async fn test_scrape_returns_visible_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header(
                "user-agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let scraper = WebScraper::new(ScrapeConfig::default()).unwrap();
        let text = scraper.scrape(&server.uri()).await.unwrap();

        assert_eq!(text, "Acme\nWe build analytics for small teams.");
    }

    #[tokio::test]
    async fn test_scrape_truncates_long_text() {
        let server = MockServer::start().await;
        let body = format!("<html><body><p>{}</p></body></html>", "a".repeat(50));
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let scraper = WebScraper::new(ScrapeConfig::new().with_max_length(10)).unwrap();
        let text = scraper.scrape(&server.uri()).await.unwrap();

        assert_eq!(text, format!("{}...", "a".repeat(10)));
    }

    #[tokio::test]
    async fn test_scrape_error_status_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let scraper = WebScraper::new(ScrapeConfig::default()).unwrap();
        assert!(scraper.scrape(&server.uri()).await.is_none());
    }

    #[tokio::test]
    async fn test_scrape_unreachable_host_is_none() {
        let scraper = WebScraper::new(ScrapeConfig::new().with_timeout(1.0)).unwrap();
        assert!(scraper.scrape("http://127.0.0.1:1/").await.is_none());
    }
}
