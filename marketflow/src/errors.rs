//! Error types for the marketflow pipeline.
//!
//! Library calls that can fail return [`MarketflowError`]. Stage failures are
//! described by [`StageError`] and then folded into the pipeline state as a
//! free-text message, so they never escape a pipeline run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for marketflow operations.
#[derive(Debug, Error)]
pub enum MarketflowError {
    /// User input failed validation before the pipeline started.
    #[error("{0}")]
    Validation(#[from] InputValidationError),

    /// The pipeline could not be assembled.
    #[error("{0}")]
    Pipeline(#[from] PipelineValidationError),

    /// The model provider returned an error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, MarketflowError>;

/// Why a single stage could not produce its record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StageError {
    /// The model call itself failed (network, auth, empty response).
    #[error("{0}")]
    Provider(String),

    /// The model output was not valid JSON.
    #[error("invalid JSON in model output: {0}")]
    MalformedJson(String),

    /// The JSON did not match the record shape.
    #[error("model output does not match the expected schema: {0}")]
    Schema(String),
}

impl StageError {
    /// Short machine-friendly name of the failure kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Provider(_) => "provider",
            Self::MalformedJson(_) => "malformed_json",
            Self::Schema(_) => "schema",
        }
    }
}

impl From<MarketflowError> for StageError {
    fn from(err: MarketflowError) -> Self {
        Self::Provider(err.to_string())
    }
}

/// A form field rejected by input validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InputValidationError {
    /// The offending field.
    pub field: String,
    /// Human-readable message shown to the user.
    pub message: String,
}

impl InputValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Metadata about a contract error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "CONTRACT-004-EMPTY").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ContractErrorInfo {
    /// Creates a new contract error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Error raised when pipeline validation fails.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<String>,
    /// Optional contract error info.
    pub error_info: Option<ContractErrorInfo>,
}

impl PipelineValidationError {
    /// Creates a new pipeline validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
            error_info: None,
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }

    /// Sets the contract error info.
    #[must_use]
    pub fn with_error_info(mut self, info: ContractErrorInfo) -> Self {
        self.error_info = Some(info);
        self
    }

    /// Returns the contract code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|info| info.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_error_info_creation() {
        let info = ContractErrorInfo::new("TEST-001", "Test error")
            .with_fix_hint("Fix this by doing that")
            .with_context_entry("stage", "market_research");

        assert_eq!(info.code, "TEST-001");
        assert_eq!(info.fix_hint, Some("Fix this by doing that".to_string()));
        assert_eq!(info.context.get("stage"), Some(&"market_research".to_string()));
    }

    #[test]
    fn test_pipeline_validation_error_code() {
        let err = PipelineValidationError::new("Pipeline has no stages")
            .with_error_info(ContractErrorInfo::new("CONTRACT-004-EMPTY", "empty"));

        assert_eq!(err.code(), Some("CONTRACT-004-EMPTY"));
        assert_eq!(err.to_string(), "Pipeline has no stages");
    }

    #[test]
    fn test_input_validation_error_displays_message() {
        let err = InputValidationError::new("industry", "Industry is required");
        let wrapped: MarketflowError = err.into();
        assert_eq!(wrapped.to_string(), "Industry is required");
    }

    #[test]
    fn test_stage_error_kinds() {
        assert_eq!(StageError::Provider("x".into()).kind(), "provider");
        assert_eq!(StageError::MalformedJson("x".into()).kind(), "malformed_json");
        assert_eq!(StageError::Schema("x".into()).kind(), "schema");
    }

    #[test]
    fn test_provider_error_converts_to_stage_error() {
        let err: StageError = MarketflowError::Provider("rate limited".into()).into();
        assert_eq!(err, StageError::Provider("Provider error: rate limited".into()));
    }
}
