//! Configuration types for web search and page scraping.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the search client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API key for the search provider. Simulated results are used when absent.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Search endpoint.
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Maximum number of simulated results returned without a provider.
    #[serde(default = "default_simulated_cap")]
    pub simulated_results_cap: usize,
}

fn default_search_endpoint() -> String {
    "https://google.serper.dev/search".to_string()
}

fn default_timeout() -> f64 {
    10.0
}

fn default_simulated_cap() -> usize {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_search_endpoint(),
            timeout_seconds: default_timeout(),
            simulated_results_cap: default_simulated_cap(),
        }
    }
}

impl SearchConfig {
    /// Creates a new search configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Whether a usable API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Gets timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

/// Configuration for page scraping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum number of characters of extracted text.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Appended when the text was cut.
    #[serde(default = "default_truncation_suffix")]
    pub truncation_suffix: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_max_length() -> usize {
    5000
}

fn default_truncation_suffix() -> String {
    "...".to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            max_length: default_max_length(),
            truncation_suffix: default_truncation_suffix(),
        }
    }
}

impl ScrapeConfig {
    /// Creates a new scrape configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the maximum text length.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Gets timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.endpoint, "https://google.serper.dev/search");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_blank_api_key_is_not_usable() {
        assert!(!SearchConfig::new().with_api_key("  ").has_api_key());
        assert!(SearchConfig::new().with_api_key("key").has_api_key());
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let config = SearchConfig::new().with_api_key("secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_scrape_config_builder() {
        let config = ScrapeConfig::new()
            .with_timeout(2.5)
            .with_max_length(100)
            .with_user_agent("custom-agent");

        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.max_length, 100);
        assert_eq!(config.user_agent, "custom-agent");
        assert_eq!(config.truncation_suffix, "...");
    }

    #[test]
    fn test_scrape_config_partial_deserialize() {
        let config: ScrapeConfig = serde_json::from_str(r#"{"max_length": 42}"#).unwrap();
        assert_eq!(config.max_length, 42);
        assert_eq!(config.timeout_seconds, 10.0);
    }
}
