//! Mock providers, adapters and stages for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::{PipelineState, StageKind};
use crate::errors::{MarketflowError, Result};
use crate::providers::{CompletionRequest, LLMResponse, LlmProvider};
use crate::stages::Stage;
use crate::websearch::{PageScraper, SearchHit, SearchProvider};

/// Mock LLM provider that replays queued replies in order.
///
/// Every request is recorded. Once the queue is empty each call fails.
#[derive(Debug, Default)]
pub struct MockLLMProvider {
    responses: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    call_count: AtomicUsize,
}

impl MockLLMProvider {
    /// Creates a provider with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that replies with `responses` in order.
    #[must_use]
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        for response in responses {
            provider.push_response(response);
        }
        provider
    }

    /// Queues a successful reply.
    pub fn push_response(&self, content: impl Into<String>) {
        self.responses.lock().push_back(Ok(content.into()));
    }

    /// Queues a provider failure.
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses.lock().push_back(Err(message.into()));
    }

    /// Returns the call count.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    /// User message of the latest request.
    #[must_use]
    pub fn last_user_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .last()
            .and_then(|request| request.user_prompt().map(str::to_string))
    }
}

#[async_trait]
impl LlmProvider for MockLLMProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<LLMResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let model = request.model.clone();
        self.requests.lock().push(request);

        match self.responses.lock().pop_front() {
            Some(Ok(content)) => Ok(LLMResponse::text(content, model, self.provider_name())),
            Some(Err(message)) => Err(MarketflowError::Provider(message)),
            None => Err(MarketflowError::Provider("no queued response".to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Search provider returning the same hits for every query.
#[derive(Debug, Default)]
pub struct StaticSearch {
    hits: Vec<SearchHit>,
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    /// Creates a provider returning `hits`, cut to the requested count.
    #[must_use]
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str, num_results: usize) -> Vec<SearchHit> {
        self.queries.lock().push(query.to_string());
        self.hits.iter().take(num_results).cloned().collect()
    }
}

/// Scraper returning a fixed page text, or nothing.
#[derive(Debug, Default)]
pub struct StaticScraper {
    content: Option<String>,
}

impl StaticScraper {
    /// Scraper that always returns `content`.
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// Scraper that always fails.
    #[must_use]
    pub fn unreachable() -> Self {
        Self { content: None }
    }
}

#[async_trait]
impl PageScraper for StaticScraper {
    async fn scrape(&self, _url: &str) -> Option<String> {
        self.content.clone()
    }
}

/// A stage that always records a failure for `kind`.
#[derive(Debug)]
pub struct FailingStage {
    kind: StageKind,
    error: String,
}

impl FailingStage {
    /// Creates a new failing stage.
    #[must_use]
    pub fn new(kind: StageKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            error: error.into(),
        }
    }
}

#[async_trait]
impl Stage for FailingStage {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    async fn execute(&self, mut state: PipelineState) -> PipelineState {
        state.record_failure(self.kind, &self.error);
        state
    }
}

/// A stage that marks `kind` completed and counts its calls.
#[derive(Debug)]
pub struct RecordingStage {
    kind: StageKind,
    seen_steps: Mutex<Vec<String>>,
}

impl RecordingStage {
    /// Creates a new recording stage.
    #[must_use]
    pub fn new(kind: StageKind) -> Self {
        Self {
            kind,
            seen_steps: Mutex::new(Vec::new()),
        }
    }

    /// The `current_step` of every state received.
    #[must_use]
    pub fn seen_steps(&self) -> Vec<String> {
        self.seen_steps.lock().clone()
    }

    /// Number of times the stage ran.
    #[must_use]
    pub fn execution_count(&self) -> usize {
        self.seen_steps.lock().len()
    }
}

#[async_trait]
impl Stage for RecordingStage {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    async fn execute(&self, mut state: PipelineState) -> PipelineState {
        self.seen_steps.lock().push(state.current_step.clone());
        state.advance(self.kind);
        state
    }
}
