//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::config::LlmConfig;
use super::messages::{CompletionRequest, LLMResponse};
use super::LlmProvider;
use crate::errors::{MarketflowError, Result};

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<OpenAiMessage>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct OpenAiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    model: Option<String>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Chat-completions client speaking the OpenAI wire format.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    config: LlmConfig,
    http_client: Client,
}

impl OpenAiProvider {
    /// Creates a provider from `config`.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| MarketflowError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http_client })
    }

    fn build_body<'a>(request: &'a CompletionRequest) -> OpenAiRequest<'a> {
        OpenAiRequest {
            model: &request.model,
            temperature: request.temperature,
            messages: request
                .messages
                .iter()
                .map(|message| OpenAiMessage {
                    role: message.role.as_str().to_string(),
                    content: Some(message.content.clone()),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<LLMResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| MarketflowError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let started = Instant::now();
        let response = self
            .http_client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&Self::build_body(&request))
            .send()
            .await
            .map_err(|e| MarketflowError::Provider(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(MarketflowError::Provider(format!(
                "OpenAI API error {status}: {body_text}"
            )));
        }

        let oai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| MarketflowError::Provider(format!("Failed to parse OpenAI response: {e}")))?;

        let choice = oai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| MarketflowError::Provider("No choices in OpenAI response".to_string()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| MarketflowError::Provider("Empty message in OpenAI response".to_string()))?;

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        debug!(model = %request.model, latency_ms, "completion received");

        Ok(LLMResponse {
            content,
            model: oai_response.model.unwrap_or(request.model),
            provider: self.provider_name().to_string(),
            input_tokens: oai_response.usage.as_ref().map(|u| u.prompt_tokens),
            output_tokens: oai_response.usage.as_ref().map(|u| u.completion_tokens),
            latency_ms: Some(latency_ms),
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
