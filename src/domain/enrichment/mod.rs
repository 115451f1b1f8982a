//! Enrichment domain module.
//!
//! Prompts and strict decoding for the post-conversation passes: symptom
//! extraction and clinical summary. Model output is untrusted; it is
//! sanitized, located, and decoded against a declared schema.

mod decoder;
mod summary;
mod symptoms;

pub use decoder::{
    ResponseSanitizer, SanitizationError, StructuredDecoder, StructuredParseError,
    MAX_FIELD_LENGTH, MAX_RESPONSE_LENGTH,
};
pub use summary::{
    summary_from_document, summary_prompt, SummaryDocument, NO_SUMMARY_PLACEHOLDER,
    SUMMARY_FAILED_PLACEHOLDER,
};
pub use symptoms::{extraction_prompt, match_to_catalog, ExtractedSymptom, ExtractedSymptoms};
