//! Post-conversation enrichment.
//!
//! Both passes ask the text-generation collaborator for structured output
//! about a saved transcript and absorb every failure at this boundary.

mod summarizer;
mod symptom_extractor;

pub use summarizer::Summarizer;
pub use symptom_extractor::SymptomExtractor;

/// Both passes want parseable JSON, not variety.
const STRUCTURED_TEMPERATURE: f32 = 0.0;
