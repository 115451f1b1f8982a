//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text-generation providers (Gemini, mock)
//! - `memory` - In-memory clinic store
//! - `http` - axum REST API

pub mod ai;
pub mod http;
pub mod memory;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider};
pub use http::AppState;
pub use memory::InMemoryClinicStore;
