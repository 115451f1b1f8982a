//! Symptom extraction pass.

use std::sync::Arc;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::clinic::SymptomRecord;
use crate::domain::dialogue::Transcript;
use crate::domain::enrichment::{
    extraction_prompt, match_to_catalog, ExtractedSymptoms, StructuredDecoder,
};
use crate::domain::foundation::ConversationId;
use crate::ports::{AIProvider, ClinicStore, CompletionRequest, RequestMetadata, RequestPurpose};

use super::STRUCTURED_TEMPERATURE;

/// Turns a saved transcript into stored symptom records.
pub struct SymptomExtractor {
    provider: Arc<dyn AIProvider>,
    store: Arc<dyn ClinicStore>,
    catalog: Arc<QuestionCatalog>,
    decoder: StructuredDecoder,
}

impl SymptomExtractor {
    pub fn new(
        provider: Arc<dyn AIProvider>,
        store: Arc<dyn ClinicStore>,
        catalog: Arc<QuestionCatalog>,
    ) -> Self {
        Self {
            provider,
            store,
            catalog,
            decoder: StructuredDecoder::new(),
        }
    }

    /// Extracts and stores the symptoms reported in `transcript`.
    ///
    /// Returns the stored records; any failure yields an empty list.
    pub async fn extract(
        &self,
        conversation_id: ConversationId,
        transcript: &Transcript,
    ) -> Vec<SymptomRecord> {
        let log = match transcript.to_json() {
            Ok(log) => log,
            Err(err) => {
                tracing::warn!(%conversation_id, error = %err, "could not serialize transcript");
                return Vec::new();
            }
        };

        let metadata = RequestMetadata::new(RequestPurpose::SymptomExtraction)
            .for_conversation(conversation_id);

        let request = CompletionRequest::prompt(metadata, extraction_prompt(&log))
            .with_temperature(STRUCTURED_TEMPERATURE);

        let response = match self.provider.complete(request).await {
            Ok(response) => {
                tracing::debug!(
                    %conversation_id,
                    total_tokens = response.usage.total_tokens,
                    "symptom extraction response received"
                );
                if response.was_truncated() {
                    tracing::warn!(%conversation_id, "symptom extraction output hit the token limit");
                }
                response
            }
            Err(err) => {
                tracing::warn!(%conversation_id, error = %err, "symptom extraction call failed");
                return Vec::new();
            }
        };

        let extracted: ExtractedSymptoms = match self.decoder.decode(&response.content) {
            Ok(extracted) => extracted,
            Err(err) => {
                tracing::warn!(%conversation_id, error = %err, "symptom extraction output rejected");
                return Vec::new();
            }
        };

        let records = match_to_catalog(conversation_id, &self.catalog, &extracted);
        let dropped = extracted.symptoms.len() - records.len();
        if dropped > 0 {
            tracing::debug!(%conversation_id, dropped, "dropped symptoms with no catalog match");
        }

        match self.store.save_symptoms(records).await {
            Ok(saved) => {
                tracing::info!(%conversation_id, count = saved.len(), "symptoms extracted");
                saved
            }
            Err(err) => {
                tracing::warn!(%conversation_id, error = %err, "failed to store symptoms");
                Vec::new()
            }
        }
    }
}
