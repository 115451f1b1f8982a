//! Dialogue sequencer.
//!
//! Drives one patient's check-in: applies each reply to the pure
//! [`DialogueState`], asks the text-generation collaborator for the next
//! bot utterance, and records it. Collaborator failures never escape; the
//! patient sees a fixed apology and can try again.

use std::sync::Arc;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::dialogue::{
    DialogueState, KeywordDigitClassifier, QuestionProgress, QuestionStatus, ResponseClassifier,
    Transcript, FALLBACK_RESPONSE,
};
use crate::domain::foundation::PatientId;
use crate::ports::{AIProvider, CompletionRequest, GenerationError, RequestMetadata, RequestPurpose};

pub struct DialogueSequencer {
    state: DialogueState,
    provider: Arc<dyn AIProvider>,
    classifier: Arc<dyn ResponseClassifier>,
}

impl std::fmt::Debug for DialogueSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueSequencer")
            .field("state", &self.state)
            .field("provider", &self.provider.provider_info().name)
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl DialogueSequencer {
    /// Creates a sequencer with an empty transcript and the default
    /// keyword/digit classifier.
    pub fn new(
        patient_id: PatientId,
        catalog: Arc<QuestionCatalog>,
        provider: Arc<dyn AIProvider>,
    ) -> Self {
        Self {
            state: DialogueState::new(patient_id, catalog),
            provider,
            classifier: Arc::new(KeywordDigitClassifier::default()),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn ResponseClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Runs one turn and returns the bot's reply.
    ///
    /// Pass an empty string first to get the greeting.
    pub async fn process_response(&mut self, user_text: &str) -> String {
        self.state.apply_user_input(user_text, self.classifier.as_ref());

        let prompt = self.state.compose_prompt();
        let metadata =
            RequestMetadata::new(RequestPurpose::Dialogue).for_patient(self.state.patient_id());
        let trace_id = metadata.trace_id.clone();

        let bot_text = match self.generate(CompletionRequest::prompt(metadata, prompt)).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    patient_id = %self.state.patient_id(),
                    trace_id = %trace_id,
                    error = %err,
                    "dialogue generation failed, using fallback reply"
                );
                FALLBACK_RESPONSE.to_string()
            }
        };

        self.state.record_assistant_turn(bot_text.clone());
        bot_text
    }

    async fn generate(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        let trace_id = request.metadata.trace_id.clone();
        let response = self.provider.complete(request).await?;
        tracing::debug!(
            trace_id = %trace_id,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "dialogue reply generated"
        );
        if response.content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(response.content)
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn current_question(&self) -> Option<&str> {
        self.state.current_question()
    }

    pub fn status_of(&self, question: &str) -> Option<QuestionStatus> {
        self.state.status_of(question)
    }

    pub fn progress(&self) -> &[QuestionProgress] {
        self.state.progress()
    }

    pub fn transcript(&self) -> &Transcript {
        self.state.transcript()
    }

    pub fn patient_id(&self) -> PatientId {
        self.state.patient_id()
    }
}
