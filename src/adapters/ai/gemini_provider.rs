//! Gemini Provider - Implementation of AIProvider for Google's Generative Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com/v1beta");
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! Requests go to `POST {base_url}/models/{model}:generateContent` with the
//! key in the `x-goog-api-key` header.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIProvider, CompletionRequest, CompletionResponse, FinishReason, GenerationError,
    MessageRole, ProviderInfo, TokenUsage,
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-1.5-flash", "gemini-1.5-pro").
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Applied when the request doesn't set its own temperature.
    pub default_temperature: Option<f32>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
            default_temperature: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_default_temperature(mut self, temperature: f32) -> Self {
        self.default_temperature = Some(temperature);
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::InvalidRequest(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|msg| GeminiContent {
                role: Some(
                    match msg.role {
                        MessageRole::User => "user",
                        MessageRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart {
                    text: Some(msg.content.clone()),
                }],
            })
            .collect();

        let generation_config = request
            .temperature
            .or(self.config.default_temperature)
            .map(|temperature| GenerationConfig {
                temperature: Some(temperature),
            });

        GeminiRequest {
            contents,
            generation_config,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, GenerationError> {
        let body = self.to_gemini_request(request);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to port errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GenerationError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &error_body))
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, GenerationError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        into_completion(gemini_response, &self.config.model)
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            let delay = match result {
                Ok(completion) => return Ok(completion),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err);
                }
                Err(err) => {
                    let delay = retry_delay(retry_count, &err);
                    tracing::debug!(
                        trace_id = %request.metadata.trace_id,
                        purpose = request.metadata.purpose.as_str(),
                        attempt = retry_count + 1,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "retrying gemini request"
                    );
                    delay
                }
            };

            sleep(delay).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = match self.config.model.as_str() {
            m if m.starts_with("gemini-1.5-pro") => 2_000_000,
            m if m.starts_with("gemini-1.5") || m.starts_with("gemini-2") => 1_000_000,
            m if m.starts_with("gemini-1.0") || m == "gemini-pro" => 32_760,
            _ => 1_000_000,
        };

        ProviderInfo::new("gemini", &self.config.model, max_context)
    }
}

/// Exponential backoff (1s, 2s, 4s, ... capped at 64s), stretched to the
/// server's `retryDelay` when a 429 carries one.
fn retry_delay(retry_count: u32, err: &GenerationError) -> Duration {
    let backoff = 1u64 << retry_count.min(6);
    let secs = match err {
        GenerationError::RateLimited { retry_after_secs } => {
            backoff.max(u64::from(*retry_after_secs))
        }
        _ => backoff,
    };
    Duration::from_secs(secs)
}

fn status_error(status: u16, error_body: &str) -> GenerationError {
    match status {
        401 | 403 => GenerationError::AuthenticationFailed,
        400 if error_body.contains("API_KEY_INVALID") => GenerationError::AuthenticationFailed,
        400 => GenerationError::InvalidRequest(error_body.to_string()),
        429 => GenerationError::rate_limited(parse_retry_delay(error_body)),
        500..=599 => {
            GenerationError::unavailable(format!("Server error {}: {}", status, error_body))
        }
        _ => GenerationError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Reads `retryDelay` (e.g. "30s") from a RetryInfo error detail.
fn parse_retry_delay(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            parsed
                .get("error")?
                .get("details")?
                .as_array()?
                .iter()
                .find_map(|detail| detail.get("retryDelay")?.as_str().map(str::to_string))
        })
        .and_then(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
        .map(|secs| secs.ceil() as u32)
        .unwrap_or(30)
}

fn into_completion(
    response: GeminiResponse,
    configured_model: &str,
) -> Result<CompletionResponse, GenerationError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
    {
        return Err(GenerationError::content_filtered(reason.clone()));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenerationError::EmptyResponse)?;

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
            FinishReason::ContentFilter
        }
        Some(_) => FinishReason::Error,
    };

    let content: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(match finish_reason {
            FinishReason::ContentFilter => GenerationError::content_filtered("response blocked"),
            _ => GenerationError::EmptyResponse,
        });
    }

    let usage = response
        .usage_metadata
        .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage,
        model: response
            .model_version
            .unwrap_or_else(|| configured_model.to_string()),
        finish_reason,
    })
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<PromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
