//! Model providers.
//!
//! Stages talk to the model service through [`LlmProvider`]. The crate ships
//! an OpenAI-compatible client; tests use the queued mock in
//! [`crate::testing`].

use async_trait::async_trait;

mod config;
mod messages;
mod openai;

pub use config::{LlmConfig, ModelSettings, DEFAULT_BASE_URL};
pub use messages::{ChatMessage, CompletionRequest, LLMResponse, Role};
pub use openai::OpenAiProvider;

use crate::errors::Result;

/// A chat-completions backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Runs one completion.
    async fn complete(&self, request: CompletionRequest) -> Result<LLMResponse>;

    /// Short provider name for logs.
    fn provider_name(&self) -> &str;
}
