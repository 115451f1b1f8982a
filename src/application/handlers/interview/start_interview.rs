//! StartInterviewHandler - Command handler for beginning a check-in.

use std::sync::Arc;

use crate::application::DialogueSequencer;
use crate::domain::catalog::QuestionCatalog;
use crate::domain::dialogue::ResponseClassifier;
use crate::domain::foundation::PatientId;
use crate::ports::{AIProvider, ClinicStore};

use super::{ActiveInterview, InterviewError, InterviewSlot, InterviewView};

#[derive(Debug, Clone)]
pub struct StartInterviewCommand {
    pub patient_id: PatientId,
}

/// Handler for starting interviews.
pub struct StartInterviewHandler {
    store: Arc<dyn ClinicStore>,
    provider: Arc<dyn AIProvider>,
    catalog: Arc<QuestionCatalog>,
    classifier: Option<Arc<dyn ResponseClassifier>>,
    slot: InterviewSlot,
}

impl StartInterviewHandler {
    pub fn new(
        store: Arc<dyn ClinicStore>,
        provider: Arc<dyn AIProvider>,
        catalog: Arc<QuestionCatalog>,
        slot: InterviewSlot,
    ) -> Self {
        Self {
            store,
            provider,
            catalog,
            classifier: None,
            slot,
        }
    }

    /// Overrides the default answer classifier for new sessions.
    pub fn with_classifier(mut self, classifier: Arc<dyn ResponseClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub async fn handle(&self, cmd: StartInterviewCommand) -> Result<InterviewView, InterviewError> {
        // 1. Patient must exist
        if self.store.find_patient(cmd.patient_id).await?.is_none() {
            return Err(InterviewError::PatientNotFound(cmd.patient_id));
        }

        // 2. Replace whatever session was active
        let mut slot = self.slot.lock().await;
        if let Some(previous) = slot.take() {
            if !previous.sequencer.is_complete() {
                tracing::info!(
                    patient_id = %previous.sequencer.patient_id(),
                    "discarding unfinished interview"
                );
            }
        }

        let mut sequencer =
            DialogueSequencer::new(cmd.patient_id, Arc::clone(&self.catalog), Arc::clone(&self.provider));
        if let Some(classifier) = &self.classifier {
            sequencer = sequencer.with_classifier(Arc::clone(classifier));
        }

        // 3. Greeting
        sequencer.process_response("").await;
        tracing::info!(patient_id = %cmd.patient_id, "interview started");

        let interview = ActiveInterview::new(sequencer);
        let view = interview.view();
        *slot = Some(interview);
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryClinicStore;
    use crate::domain::catalog::{reference_catalog, Question};
    use crate::domain::dialogue::AnswerClassification;

    fn handler(provider: MockAIProvider, slot: InterviewSlot) -> StartInterviewHandler {
        StartInterviewHandler::new(
            Arc::new(InMemoryClinicStore::seeded(3)),
            Arc::new(provider),
            reference_catalog(),
            slot,
        )
    }

    #[tokio::test]
    async fn starts_with_greeting() {
        let slot = InterviewSlot::new();
        let provider = MockAIProvider::new().with_response("Hi! Are you having difficulty breathing?");

        let view = handler(provider, slot.clone())
            .handle(StartInterviewCommand { patient_id: PatientId::new(2) })
            .await
            .unwrap();

        assert_eq!(view.patient_id, PatientId::new(2));
        assert_eq!(view.transcript.len(), 1);
        assert_eq!(view.current_question.as_deref(), Some("Are you having difficulty breathing?"));
        assert!(!view.complete);
        assert!(view.conversation_id.is_none());
        assert!(slot.lock().await.is_some());
    }

    #[tokio::test]
    async fn unknown_patient_is_rejected_and_slot_untouched() {
        let slot = InterviewSlot::new();
        let provider = MockAIProvider::new();

        let result = handler(provider.clone(), slot.clone())
            .handle(StartInterviewCommand { patient_id: PatientId::new(7) })
            .await;

        assert!(matches!(result, Err(InterviewError::PatientNotFound(id)) if id == PatientId::new(7)));
        assert!(slot.lock().await.is_none());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn restarting_replaces_previous_session() {
        let slot = InterviewSlot::new();
        let h = handler(MockAIProvider::new(), slot.clone());

        h.handle(StartInterviewCommand { patient_id: PatientId::new(1) }).await.unwrap();
        let view = h
            .handle(StartInterviewCommand { patient_id: PatientId::new(3) })
            .await
            .unwrap();

        assert_eq!(view.patient_id, PatientId::new(3));
        let guard = slot.lock().await;
        assert_eq!(guard.as_ref().unwrap().sequencer.patient_id(), PatientId::new(3));
    }

    #[derive(Debug)]
    struct AlwaysResolved;

    impl ResponseClassifier for AlwaysResolved {
        fn classify(&self, _question: &Question, _answer: &str) -> AnswerClassification {
            AnswerClassification::Resolved
        }
    }

    #[tokio::test]
    async fn custom_classifier_is_used_by_new_sessions() {
        let slot = InterviewSlot::new();
        let h = handler(MockAIProvider::new(), slot.clone()).with_classifier(Arc::new(AlwaysResolved));

        h.handle(StartInterviewCommand { patient_id: PatientId::new(1) }).await.unwrap();

        let mut guard = slot.lock().await;
        let interview = guard.as_mut().unwrap();
        interview.sequencer.process_response("whatever").await;
        assert_eq!(
            interview.sequencer.current_question(),
            Some("Are you having a fever of over 100 degrees, or chills?")
        );
    }
}
