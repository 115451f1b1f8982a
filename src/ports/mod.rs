//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Text-generation collaborator (dialogue, extraction, summary)
//! - `ClinicStore` - Patients, saved conversations and symptom records

mod ai_provider;
mod clinic_store;

pub use ai_provider::{
    AIProvider, CompletionRequest, CompletionResponse, FinishReason, GenerationError, Message,
    MessageRole, ProviderInfo, RequestMetadata, RequestPurpose, TokenUsage,
};
pub use clinic_store::ClinicStore;
