//! GetInterviewHandler - Query handler for the active interview.

use super::{InterviewError, InterviewSlot, InterviewView};

#[derive(Debug, Clone, Default)]
pub struct GetInterviewQuery;

pub struct GetInterviewHandler {
    slot: InterviewSlot,
}

impl GetInterviewHandler {
    pub fn new(slot: InterviewSlot) -> Self {
        Self { slot }
    }

    pub async fn handle(&self, _query: GetInterviewQuery) -> Result<InterviewView, InterviewError> {
        self.slot
            .lock()
            .await
            .as_ref()
            .map(|interview| interview.view())
            .ok_or(InterviewError::NoActiveInterview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::application::handlers::interview::ActiveInterview;
    use crate::application::DialogueSequencer;
    use crate::domain::catalog::reference_catalog;
    use crate::domain::foundation::PatientId;
    use std::sync::Arc;

    #[tokio::test]
    async fn returns_error_without_active_interview() {
        let handler = GetInterviewHandler::new(InterviewSlot::new());

        let result = handler.handle(GetInterviewQuery).await;

        assert!(matches!(result, Err(InterviewError::NoActiveInterview)));
    }

    #[tokio::test]
    async fn returns_view_of_active_interview() {
        let slot = InterviewSlot::new();
        let mut sequencer = DialogueSequencer::new(
            PatientId::new(2),
            reference_catalog(),
            Arc::new(MockAIProvider::new().with_response("Hello")),
        );
        sequencer.process_response("").await;
        *slot.lock().await = Some(ActiveInterview::new(sequencer));

        let view = GetInterviewHandler::new(slot).handle(GetInterviewQuery).await.unwrap();

        assert_eq!(view.patient_id, PatientId::new(2));
        assert_eq!(view.transcript.turns()[0].content, "Hello");
        assert_eq!(view.progress.len(), 4);
    }
}
