//! AI Provider Port - Interface for the text-generation collaborator.
//!
//! The dialogue sequencer, symptom extractor and summarizer all talk to the
//! model through this port, so none of them know which vendor is behind it.
//!
//! # Design
//!
//! - Non-streaming completions only; every caller needs the whole text
//! - Provider-agnostic message format
//! - Error types for common failure modes (rate limits, auth, empty output)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{ConversationId, PatientId};

/// Port for text-generation provider interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, GenerationError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Prompt messages, in order.
    pub messages: Vec<Message>,
    /// Temperature for response randomness (0.0 = deterministic).
    /// Falls back to the provider's default when unset.
    pub temperature: Option<f32>,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates an empty request.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            temperature: None,
            metadata,
        }
    }

    /// A request holding one user message.
    pub fn prompt(metadata: RequestMetadata, text: impl Into<String>) -> Self {
        Self::new(metadata).with_message(MessageRole::User, text)
    }

    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A single message in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Role of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Why the model is being called; carried into logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPurpose {
    /// Next bot utterance in a check-in.
    Dialogue,
    /// Structured symptom records from a finished transcript.
    SymptomExtraction,
    /// Clinical summary of a finished transcript.
    Summary,
}

impl RequestPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPurpose::Dialogue => "dialogue",
            RequestPurpose::SymptomExtraction => "symptom_extraction",
            RequestPurpose::Summary => "summary",
        }
    }
}

/// Metadata attached to every request for log correlation.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub purpose: RequestPurpose,
    pub patient_id: Option<PatientId>,
    pub conversation_id: Option<ConversationId>,
    /// Trace ID for correlating log lines.
    pub trace_id: String,
}

impl RequestMetadata {
    /// Creates metadata with a fresh trace id.
    pub fn new(purpose: RequestPurpose) -> Self {
        Self {
            purpose,
            patient_id: None,
            conversation_id: None,
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn for_patient(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    pub fn for_conversation(mut self, conversation_id: ConversationId) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }
}

/// Response from a completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    /// True when the model stopped at its output limit, so structured
    /// output is likely cut off.
    pub fn was_truncated(&self) -> bool {
        self.finish_reason == FinishReason::Length
    }
}

/// Token usage as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit the output token limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    Error,
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,
    /// Maximum context window size in tokens.
    pub max_context_tokens: u32,
}

impl ProviderInfo {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        max_context_tokens: u32,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            max_context_tokens,
        }
    }
}

/// Text-generation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Rate limited or quota exhausted.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Content was blocked by the provider's safety filters.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key missing or rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider's response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// The provider answered but produced no text.
    #[error("provider returned no text")]
    EmptyResponse,
}

impl GenerationError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}
