//! Clinical summary prompt and decoding.

use serde::Deserialize;

/// Recorded when the collaborator call or decoding fails.
pub const SUMMARY_FAILED_PLACEHOLDER: &str = "Summary generation failed.";

/// Recorded when the decoded document has no usable summary.
pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary available.";

const SUMMARY_TEMPLATE: &str = r#"Create a clinical summary of this conversation in bullet points. Focus on:
- Reported symptoms
- Severity levels
- Patient comments
Format: {"summary": "bullet points as markdown"}

Conversation Log: {log}"#;

pub fn summary_prompt(transcript_json: &str) -> String {
    SUMMARY_TEMPLATE.replace("{log}", transcript_json)
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SummaryDocument {
    #[serde(default)]
    pub summary: Option<String>,
}

/// Text to record for a decoded document.
pub fn summary_from_document(document: SummaryDocument) -> String {
    match document.summary {
        Some(text) if !text.trim().is_empty() => text,
        _ => NO_SUMMARY_PLACEHOLDER.to_string(),
    }
}
