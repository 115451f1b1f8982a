//! Mock AI Provider for testing and offline runs.
//!
//! Provides a scripted implementation of the AIProvider port so the
//! interview can be exercised without calling a real model.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - A configurable default once the script runs out
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Hello! Are you having difficulty breathing?")
//!     .with_error(GenerationError::EmptyResponse);
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIProvider, CompletionRequest, CompletionResponse, FinishReason, GenerationError,
    ProviderInfo, TokenUsage,
};

const DEFAULT_CONTENT: &str = "Mock response";

/// Mock AI provider.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Returned once the queue is empty.
    default_content: String,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        usage: TokenUsage,
        finish_reason: FinishReason,
    },
    Error(GenerationError),
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_content: DEFAULT_CONTENT.to_string(),
            info: ProviderInfo::new("mock", "mock-model-1", 128_000),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.with_response_full(content, TokenUsage::new(10, 20), FinishReason::Stop)
    }

    pub fn with_response_full(
        self,
        content: impl Into<String>,
        usage: TokenUsage,
        finish_reason: FinishReason,
    ) -> Self {
        lock(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
            usage,
            finish_reason,
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: GenerationError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets the content returned after the queue is exhausted.
    pub fn with_default_response(mut self, content: impl Into<String>) -> Self {
        self.default_content = content.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Queues a response at runtime (the builder methods consume `self`).
    pub fn push_response(&self, content: impl Into<String>) {
        lock(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
            usage: TokenUsage::new(10, 20),
            finish_reason: FinishReason::Stop,
        });
    }

    pub fn push_error(&self, error: GenerationError) {
        lock(&self.responses).push_back(MockResponse::Error(error));
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: self.default_content.clone(),
                usage: TokenUsage::new(5, 10),
                finish_reason: FinishReason::Stop,
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success {
                content,
                usage,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
