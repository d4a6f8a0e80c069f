//! Application configuration.
//!
//! Values come from an optional TOML file, then the environment variables
//! `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `SERPER_API_KEY` override it.
//!
//! ```toml
//! [llm]
//! base_url = "https://api.openai.com/v1"
//!
//! [stages.strategy_planning]
//! model = "gpt-4o"
//! temperature = 0.5
//!
//! [pipeline]
//! failure_mode = "fail_fast"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::StageKind;
use crate::errors::{MarketflowError, Result};
use crate::pipeline::FailureMode;
use crate::providers::{LlmConfig, ModelSettings};
use crate::websearch::{ScrapeConfig, SearchConfig};

/// Environment variable holding the model API key.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the model API root.
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
/// Environment variable holding the search API key.
pub const ENV_SERPER_API_KEY: &str = "SERPER_API_KEY";

/// Per-stage model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageModels {
    /// Market research.
    #[serde(default = "default_market_research")]
    pub market_research: ModelSettings,
    /// Trend analysis.
    #[serde(default = "default_trend_analysis")]
    pub trend_analysis: ModelSettings,
    /// Strategy planning.
    #[serde(default = "default_strategy_planning")]
    pub strategy_planning: ModelSettings,
    /// Content creation.
    #[serde(default = "default_content_creation")]
    pub content_creation: ModelSettings,
}

fn default_market_research() -> ModelSettings {
    ModelSettings::new("gpt-4o-mini", 0.3)
}

fn default_trend_analysis() -> ModelSettings {
    ModelSettings::new("gpt-4o-mini", 0.4)
}

fn default_strategy_planning() -> ModelSettings {
    ModelSettings::new("gpt-4o", 0.5)
}

fn default_content_creation() -> ModelSettings {
    ModelSettings::new("gpt-4o", 0.7)
}

impl Default for StageModels {
    fn default() -> Self {
        Self {
            market_research: default_market_research(),
            trend_analysis: default_trend_analysis(),
            strategy_planning: default_strategy_planning(),
            content_creation: default_content_creation(),
        }
    }
}

impl StageModels {
    /// Settings for `kind`.
    #[must_use]
    pub fn for_stage(&self, kind: StageKind) -> &ModelSettings {
        match kind {
            StageKind::MarketResearch => &self.market_research,
            StageKind::TrendAnalysis => &self.trend_analysis,
            StageKind::StrategyPlanning => &self.strategy_planning,
            StageKind::ContentCreation => &self.content_creation,
        }
    }

    /// Uses `model` for every stage, keeping temperatures.
    #[must_use]
    pub fn with_model_everywhere(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        for settings in [
            &mut self.market_research,
            &mut self.trend_analysis,
            &mut self.strategy_planning,
            &mut self.content_creation,
        ] {
            settings.model.clone_from(&model);
        }
        self
    }
}

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name used in logs and events.
    #[serde(default = "default_pipeline_name")]
    pub name: String,
    /// How stage failures are handled.
    #[serde(default)]
    pub failure_mode: FailureMode,
}

fn default_pipeline_name() -> String {
    "marketing-analysis".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: default_pipeline_name(),
            failure_mode: FailureMode::default(),
        }
    }
}

impl PipelineConfig {
    /// Sets the failure mode.
    #[must_use]
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }
}

/// Everything needed to assemble a pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model service.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Web search.
    #[serde(default)]
    pub search: SearchConfig,
    /// Page scraping.
    #[serde(default)]
    pub scrape: ScrapeConfig,
    /// Per-stage models.
    #[serde(default)]
    pub stages: StageModels,
    /// Orchestrator.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Loads `path` if given, then applies the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.apply_env(|key| std::env::var(key).ok()))
    }

    /// Parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)
            .map_err(|e| MarketflowError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this shape.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MarketflowError::Config(e.to_string()))
    }

    /// Overrides secrets and endpoints from `lookup`.
    ///
    /// Blank values are ignored.
    #[must_use]
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(ENV_OPENAI_API_KEY) {
            self.llm.api_key = Some(key);
        }
        if let Some(base_url) = get(ENV_OPENAI_BASE_URL) {
            self.llm.base_url = base_url;
        }
        if let Some(key) = get(ENV_SERPER_API_KEY) {
            self.search.api_key = Some(key);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_stage_model_defaults() {
        let models = StageModels::default();
        assert_eq!(models.for_stage(StageKind::MarketResearch).model, "gpt-4o-mini");
        assert_eq!(models.for_stage(StageKind::TrendAnalysis).temperature, 0.4);
        assert_eq!(models.for_stage(StageKind::StrategyPlanning).model, "gpt-4o");
        assert_eq!(models.for_stage(StageKind::ContentCreation).temperature, 0.7);
    }

    #[test]
    fn test_with_model_everywhere_keeps_temperatures() {
        let models = StageModels::default().with_model_everywhere("local-model");
        assert_eq!(models.market_research.model, "local-model");
        assert_eq!(models.content_creation.model, "local-model");
        assert_eq!(models.content_creation.temperature, 0.7);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [stages.strategy_planning]
            model = "gpt-4.1"
            temperature = 0.2

            [scrape]
            max_length = 1000

            [pipeline]
            failure_mode = "fail_fast"
            "#,
        )
        .unwrap();

        assert_eq!(config.stages.strategy_planning.model, "gpt-4.1");
        assert_eq!(config.stages.market_research.model, "gpt-4o-mini");
        assert_eq!(config.scrape.max_length, 1000);
        assert_eq!(config.pipeline.failure_mode, FailureMode::FailFast);
        assert_eq!(config.pipeline.name, "marketing-analysis");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[pipeline]\nfailure_mode = 3").unwrap_err();
        assert!(matches!(err, MarketflowError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-env"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
            ("SERPER_API_KEY", "   "),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::default().apply_env(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
        assert!(config.search.api_key.is_none());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\ntimeout_seconds = 45.0").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.llm.timeout_seconds, Some(45.0));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/marketflow.toml")).unwrap_err();
        assert!(matches!(err, MarketflowError::Io(_)));
    }
}
