//! Clinical summary pass.

use std::sync::Arc;

use crate::domain::dialogue::Transcript;
use crate::domain::enrichment::{
    summary_from_document, summary_prompt, StructuredDecoder, SummaryDocument,
    SUMMARY_FAILED_PLACEHOLDER,
};
use crate::domain::foundation::ConversationId;
use crate::ports::{AIProvider, ClinicStore, CompletionRequest, RequestMetadata, RequestPurpose};

use super::STRUCTURED_TEMPERATURE;

/// Writes a bullet-point summary onto a saved conversation.
pub struct Summarizer {
    provider: Arc<dyn AIProvider>,
    store: Arc<dyn ClinicStore>,
    decoder: StructuredDecoder,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn AIProvider>, store: Arc<dyn ClinicStore>) -> Self {
        Self {
            provider,
            store,
            decoder: StructuredDecoder::new(),
        }
    }

    /// Generates, records and returns the summary text.
    ///
    /// Failures produce a placeholder, which is recorded the same way.
    pub async fn summarize(&self, conversation_id: ConversationId, transcript: &Transcript) -> String {
        let summary = self.generate(conversation_id, transcript).await;

        if let Err(err) = self.store.record_summary(conversation_id, summary.clone()).await {
            tracing::warn!(%conversation_id, error = %err, "failed to record summary");
        }

        summary
    }

    async fn generate(&self, conversation_id: ConversationId, transcript: &Transcript) -> String {
        let log = match transcript.to_json() {
            Ok(log) => log,
            Err(err) => {
                tracing::warn!(%conversation_id, error = %err, "could not serialize transcript");
                return SUMMARY_FAILED_PLACEHOLDER.to_string();
            }
        };

        let metadata =
            RequestMetadata::new(RequestPurpose::Summary).for_conversation(conversation_id);

        let request = CompletionRequest::prompt(metadata, summary_prompt(&log))
            .with_temperature(STRUCTURED_TEMPERATURE);

        let response = match self.provider.complete(request).await {
            Ok(response) => {
                tracing::debug!(
                    %conversation_id,
                    total_tokens = response.usage.total_tokens,
                    "summary response received"
                );
                if response.was_truncated() {
                    tracing::warn!(%conversation_id, "summary output hit the token limit");
                }
                response
            }
            Err(err) => {
                tracing::warn!(%conversation_id, error = %err, "summary call failed");
                return SUMMARY_FAILED_PLACEHOLDER.to_string();
            }
        };

        match self.decoder.decode::<SummaryDocument>(&response.content) {
            Ok(document) => summary_from_document(document),
            Err(err) => {
                tracing::warn!(%conversation_id, error = %err, "summary output rejected");
                SUMMARY_FAILED_PLACEHOLDER.to_string()
            }
        }
    }
}
