//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models via the `generateContent` REST API
//! - `MockAIProvider` - Scripted provider for tests and offline runs

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockAIProvider, MockResponse};
