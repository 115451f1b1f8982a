//! SubmitResponseHandler - Command handler for a patient reply.

use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;

use crate::application::enrichment::{Summarizer, SymptomExtractor};
use crate::ports::ClinicStore;

use super::{ActiveInterview, InterviewError, InterviewSlot, InterviewView};

#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    pub text: String,
}

impl SubmitResponseCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Handler for patient replies.
///
/// When a reply finishes the interview, the transcript is saved and the
/// extraction and summary passes run before the view is returned.
pub struct SubmitResponseHandler {
    store: Arc<dyn ClinicStore>,
    extractor: Arc<SymptomExtractor>,
    summarizer: Arc<Summarizer>,
    slot: InterviewSlot,
}

impl SubmitResponseHandler {
    pub fn new(
        store: Arc<dyn ClinicStore>,
        extractor: Arc<SymptomExtractor>,
        summarizer: Arc<Summarizer>,
        slot: InterviewSlot,
    ) -> Self {
        Self {
            store,
            extractor,
            summarizer,
            slot,
        }
    }

    pub async fn handle(&self, cmd: SubmitResponseCommand) -> Result<InterviewView, InterviewError> {
        // 1. Validate
        if cmd.text.trim().is_empty() {
            return Err(InterviewError::EmptyResponse);
        }

        // 2. The turn and any completion hand-off run detached, holding the
        // slot, so a dropped request cannot leave a finished interview
        // unsaved or unsummarized.
        let slot = self.slot.lock_owned().await;
        let handoff = CompletionHandoff {
            store: Arc::clone(&self.store),
            extractor: Arc::clone(&self.extractor),
            summarizer: Arc::clone(&self.summarizer),
        };

        tokio::spawn(run_turn(slot, cmd.text, handoff))
            .await
            .map_err(|e| InterviewError::TurnFailed(e.to_string()))?
    }
}

struct CompletionHandoff {
    store: Arc<dyn ClinicStore>,
    extractor: Arc<SymptomExtractor>,
    summarizer: Arc<Summarizer>,
}

impl CompletionHandoff {
    /// Saves the finished transcript, then extracts symptoms and summarizes.
    async fn run(&self, interview: &mut ActiveInterview) -> Result<(), InterviewError> {
        let patient_id = interview.sequencer.patient_id();
        let transcript = interview.sequencer.transcript().clone();

        let conversation = self.store.save_conversation(patient_id, transcript).await?;
        interview.conversation_id = Some(conversation.id);
        tracing::info!(
            %patient_id,
            conversation_id = %conversation.id,
            "interview complete, conversation saved"
        );

        self.extractor
            .extract(conversation.id, &conversation.transcript)
            .await;
        self.summarizer
            .summarize(conversation.id, &conversation.transcript)
            .await;
        Ok(())
    }
}

async fn run_turn(
    mut slot: OwnedMutexGuard<Option<ActiveInterview>>,
    text: String,
    handoff: CompletionHandoff,
) -> Result<InterviewView, InterviewError> {
    // 3. A session must be active
    let interview = slot.as_mut().ok_or(InterviewError::NoActiveInterview)?;

    // 4. One dialogue turn, unless the session already finished
    if interview.sequencer.is_complete() {
        if interview.conversation_id.is_some() {
            return Err(InterviewError::InterviewComplete);
        }
        // Finished but never saved: the reply is not recorded, the
        // hand-off is retried instead.
        tracing::warn!(
            patient_id = %interview.sequencer.patient_id(),
            "retrying completion hand-off for unsaved interview"
        );
    } else {
        interview.sequencer.process_response(&text).await;
    }

    // 5. Completion hand-off
    if interview.sequencer.is_complete() && interview.conversation_id.is_none() {
        handoff.run(interview).await?;
    }

    Ok(interview.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryClinicStore;
    use crate::application::handlers::interview::{StartInterviewCommand, StartInterviewHandler};
    use crate::domain::catalog::reference_catalog;
    use crate::domain::foundation::{ConversationId, PatientId};
    use crate::ports::AIProvider;

    struct Fixture {
        provider: MockAIProvider,
        store: InMemoryClinicStore,
        slot: InterviewSlot,
        start: StartInterviewHandler,
        submit: SubmitResponseHandler,
    }

    fn fixture() -> Fixture {
        let provider = MockAIProvider::new();
        let store = InMemoryClinicStore::seeded(3);
        let slot = InterviewSlot::new();
        let ai: Arc<dyn AIProvider> = Arc::new(provider.clone());
        let clinic: Arc<dyn ClinicStore> = Arc::new(store.clone());

        let start = StartInterviewHandler::new(
            Arc::clone(&clinic),
            Arc::clone(&ai),
            reference_catalog(),
            slot.clone(),
        );
        let submit = SubmitResponseHandler::new(
            Arc::clone(&clinic),
            Arc::new(SymptomExtractor::new(
                Arc::clone(&ai),
                Arc::clone(&clinic),
                reference_catalog(),
            )),
            Arc::new(Summarizer::new(Arc::clone(&ai), Arc::clone(&clinic))),
            slot.clone(),
        );

        Fixture {
            provider,
            store,
            slot,
            start,
            submit,
        }
    }

    async fn started(f: &Fixture) {
        f.start
            .handle(StartInterviewCommand {
                patient_id: PatientId::new(1),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejects_blank_text() {
        let f = fixture();
        started(&f).await;

        let result = f.submit.handle(SubmitResponseCommand::new("   ")).await;

        assert!(matches!(result, Err(InterviewError::EmptyResponse)));
    }

    #[tokio::test]
    async fn rejects_when_no_interview_is_active() {
        let f = fixture();

        let result = f.submit.handle(SubmitResponseCommand::new("yes")).await;

        assert!(matches!(result, Err(InterviewError::NoActiveInterview)));
    }

    #[tokio::test]
    async fn unresolved_reply_keeps_question() {
        let f = fixture();
        started(&f).await;

        let view = f.submit.handle(SubmitResponseCommand::new("It's been getting worse lately")).await.unwrap();

        assert_eq!(view.current_question.as_deref(), Some("Are you having difficulty breathing?"));
        assert_eq!(view.transcript.len(), 3);
        assert!(!view.complete);
    }

    #[tokio::test]
    async fn completion_saves_conversation_and_enriches_it() {
        let f = fixture();
        started(&f).await;

        for answer in ["no", "no", "yes"] {
            let view = f.submit.handle(SubmitResponseCommand::new(answer)).await.unwrap();
            assert!(!view.complete);
        }

        // Final dialogue turn, then extraction, then summary
        f.provider.push_response("Thank you! Your doctor will review this.");
        f.provider.push_response(
            r#"{"symptoms": [{"question": "Have you had persistent constipation, nausea, or vomiting?", "response": "yes"}]}"#,
        );
        f.provider.push_response(r#"{"summary": "- Reports nausea"}"#);

        let view = f.submit.handle(SubmitResponseCommand::new("no")).await.unwrap();

        assert!(view.complete);
        assert_eq!(view.current_question, None);
        assert_eq!(view.conversation_id, Some(ConversationId::new(1)));

        let conv = f.store.find_conversation(ConversationId::new(1)).await.unwrap().unwrap();
        assert_eq!(conv.patient_id, PatientId::new(1));
        assert_eq!(conv.transcript, view.transcript);
        assert_eq!(conv.summary, "- Reports nausea");
        assert_eq!(f.store.symptom_count().await, 1);
    }

    #[tokio::test]
    async fn rejects_replies_after_completion() {
        let f = fixture();
        started(&f).await;
        for answer in ["no", "no", "no", "no"] {
            f.submit.handle(SubmitResponseCommand::new(answer)).await.unwrap();
        }

        let result = f.submit.handle(SubmitResponseCommand::new("one more")).await;

        assert!(matches!(result, Err(InterviewError::InterviewComplete)));
        assert_eq!(f.store.conversation_count().await, 1);
        let guard = f.slot.lock().await;
        assert!(guard.as_ref().unwrap().conversation_id.is_some());
    }

    mod dropped_requests {
        use super::*;
        use std::time::Duration;

        fn slow_fixture() -> Fixture {
            let mut f = fixture();
            let provider = MockAIProvider::new().with_delay(Duration::from_millis(100));
            let ai: Arc<dyn AIProvider> = Arc::new(provider.clone());
            let clinic: Arc<dyn ClinicStore> = Arc::new(f.store.clone());
            f.start = StartInterviewHandler::new(
                Arc::clone(&clinic),
                Arc::clone(&ai),
                reference_catalog(),
                f.slot.clone(),
            );
            f.submit = SubmitResponseHandler::new(
                Arc::clone(&clinic),
                Arc::new(SymptomExtractor::new(
                    Arc::clone(&ai),
                    Arc::clone(&clinic),
                    reference_catalog(),
                )),
                Arc::new(Summarizer::new(Arc::clone(&ai), Arc::clone(&clinic))),
                f.slot.clone(),
            );
            f.provider = provider;
            f
        }

        #[tokio::test]
        async fn final_turn_finishes_after_the_caller_gives_up() {
            let f = slow_fixture();
            started(&f).await;
            for answer in ["no", "no", "no"] {
                f.submit.handle(SubmitResponseCommand::new(answer)).await.unwrap();
            }
            f.provider.push_response("Thank you! Your doctor will review this.");
            f.provider.push_response(r#"{"symptoms": []}"#);
            f.provider.push_response(r#"{"summary": "- No complaints"}"#);

            // Dialogue, extraction and summary take ~300ms together
            let outcome = tokio::time::timeout(
                Duration::from_millis(50),
                f.submit.handle(SubmitResponseCommand::new("no")),
            )
            .await;
            assert!(outcome.is_err());

            // The detached turn still holds the slot; wait for it
            let guard = f.slot.lock().await;
            let conversation_id = guard.as_ref().unwrap().conversation_id.unwrap();
            drop(guard);

            let conv = f.store.find_conversation(conversation_id).await.unwrap().unwrap();
            assert_eq!(conv.summary, "- No complaints");
            assert!(conv.summarized_at.is_some());
            assert_eq!(f.provider.call_count(), 7);
        }

        #[tokio::test]
        async fn retry_after_dropped_final_turn_reports_completion() {
            let f = slow_fixture();
            started(&f).await;
            for answer in ["no", "no", "no"] {
                f.submit.handle(SubmitResponseCommand::new(answer)).await.unwrap();
            }
            let _ = tokio::time::timeout(
                Duration::from_millis(150),
                f.submit.handle(SubmitResponseCommand::new("no")),
            )
            .await;

            let result = f.submit.handle(SubmitResponseCommand::new("no")).await;

            assert!(matches!(result, Err(InterviewError::InterviewComplete)));
            assert_eq!(f.store.conversation_count().await, 1);
        }
    }

    #[tokio::test]
    async fn unsaved_complete_interview_reruns_handoff() {
        let f = fixture();
        started(&f).await;
        {
            let mut guard = f.slot.lock().await;
            let interview = guard.as_mut().unwrap();
            for answer in ["no", "no", "no", "no"] {
                interview.sequencer.process_response(answer).await;
            }
            assert!(interview.sequencer.is_complete());
            assert!(interview.conversation_id.is_none());
        }
        let turns_before = f.slot.lock().await.as_ref().unwrap().sequencer.transcript().len();

        let view = f.submit.handle(SubmitResponseCommand::new("hello?")).await.unwrap();

        assert!(view.complete);
        assert_eq!(view.conversation_id, Some(ConversationId::new(1)));
        assert_eq!(view.transcript.len(), turns_before);
        assert_eq!(f.store.conversation_count().await, 1);
    }
}
