//! Request and response types for chat completions.

use serde::{Deserialize, Serialize};

use super::config::ModelSettings;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions.
    System,
    /// The request.
    User,
    /// A model reply.
    Assistant,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author.
    pub role: Role,
    /// Text.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single chat-completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Conversation, system message first.
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// A system + user request using `settings`.
    #[must_use]
    pub fn new(settings: &ModelSettings, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: settings.model.clone(),
            temperature: settings.temperature,
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        }
    }

    /// Content of the last user message.
    #[must_use]
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
    }
}

/// LLM response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    /// Text of the first choice.
    pub content: String,
    /// Model that answered.
    pub model: String,
    /// Provider name.
    pub provider: String,
    /// Prompt tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,
    /// Completion tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,
    /// Round-trip latency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    /// Why generation stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl LLMResponse {
    /// A response carrying only `content`.
    #[must_use]
    pub fn text(content: impl Into<String>, model: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            provider: provider.into(),
            input_tokens: None,
            output_tokens: None,
            latency_ms: None,
            finish_reason: None,
        }
    }

    /// Returns total tokens.
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.unwrap_or(0) + self.output_tokens.unwrap_or(0)
    }
}
