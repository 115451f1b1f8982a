//! End-to-end check-in through the application handlers, from greeting to
//! the clinician's overview.

use std::sync::Arc;

use recover::adapters::ai::MockAIProvider;
use recover::adapters::memory::InMemoryClinicStore;
use recover::application::enrichment::{Summarizer, SymptomExtractor};
use recover::application::handlers::dashboard::{
    GetConversationDetailHandler, GetConversationDetailQuery, GetPatientOverviewHandler,
    GetPatientOverviewQuery,
};
use recover::application::handlers::interview::{
    InterviewError, InterviewSlot, StartInterviewCommand, StartInterviewHandler,
    SubmitResponseCommand, SubmitResponseHandler,
};
use recover::domain::catalog::reference_catalog;
use recover::domain::foundation::PatientId;
use recover::ports::{AIProvider, ClinicStore, GenerationError};

const EXTRACTION: &str = r#"```json
{"symptoms": [
  {"question": "Are you having difficulty breathing?", "response": "Yes, a bit when climbing stairs", "likert": 4},
  {"question": "Have you had persistent constipation, nausea, or vomiting?", "response": "Some nausea", "likert": "6"},
  {"question": "Do you have a headache?", "response": "No", "likert": null}
]}
```"#;

struct Clinic {
    provider: MockAIProvider,
    store: InMemoryClinicStore,
    start: StartInterviewHandler,
    submit: SubmitResponseHandler,
    overview: GetPatientOverviewHandler,
    detail: GetConversationDetailHandler,
}

fn clinic() -> Clinic {
    let provider = MockAIProvider::new();
    let store = InMemoryClinicStore::seeded(3);
    let ai: Arc<dyn AIProvider> = Arc::new(provider.clone());
    let clinic: Arc<dyn ClinicStore> = Arc::new(store.clone());
    let slot = InterviewSlot::new();

    Clinic {
        start: StartInterviewHandler::new(
            clinic.clone(),
            ai.clone(),
            reference_catalog(),
            slot.clone(),
        ),
        submit: SubmitResponseHandler::new(
            clinic.clone(),
            Arc::new(SymptomExtractor::new(
                ai.clone(),
                clinic.clone(),
                reference_catalog(),
            )),
            Arc::new(Summarizer::new(ai, clinic.clone())),
            slot,
        ),
        overview: GetPatientOverviewHandler::new(clinic.clone(), reference_catalog()),
        detail: GetConversationDetailHandler::new(clinic),
        provider,
        store,
    }
}

async fn answer(clinic: &Clinic, text: &str) -> recover::application::handlers::interview::InterviewView {
    clinic
        .submit
        .handle(SubmitResponseCommand::new(text))
        .await
        .unwrap()
}

#[tokio::test]
async fn full_check_in_reaches_the_dashboard() {
    let c = clinic();
    c.provider.push_response("Hello! Are you having difficulty breathing?");
    c.provider.push_response("On a scale of 1 to 10, how bad is it?");
    c.provider.push_response("Any fever or chills?");
    c.provider.push_response("Any constipation, nausea or vomiting?");
    c.provider.push_response("Anything else you'd like to mention?");
    c.provider.push_response("Thank you, that's everything for today.");
    c.provider.push_response(EXTRACTION);
    c.provider
        .push_response(r#"{"summary": "- Mild dyspnea on exertion\n- Nausea 6/10"}"#);

    let patient_id = PatientId::new(2);
    let view = c
        .start
        .handle(StartInterviewCommand { patient_id })
        .await
        .unwrap();
    assert_eq!(view.transcript.len(), 1);
    assert!(!view.complete);

    // "a bit" leaves the first question open; the score settles it
    let view = answer(&c, "a bit when climbing stairs").await;
    assert_eq!(
        view.current_question.as_deref(),
        Some("Are you having difficulty breathing?")
    );
    answer(&c, "about a 4").await;
    answer(&c, "no fever").await;
    answer(&c, "some nausea, maybe 6").await;
    let view = answer(&c, "nothing else").await;

    assert!(view.complete);
    assert!(view.current_question.is_none());
    assert_eq!(view.transcript.len(), 11);
    let conversation_id = view.conversation_id.expect("conversation saved");
    assert_eq!(c.provider.call_count(), 8);

    let detail = c
        .detail
        .handle(GetConversationDetailQuery { conversation_id })
        .await
        .unwrap();
    assert_eq!(detail.conversation.patient_id, patient_id);
    assert_eq!(detail.conversation.summary, "- Mild dyspnea on exertion\n- Nausea 6/10");
    // The off-catalog item is dropped
    assert_eq!(detail.symptoms.len(), 2);

    let overview = c
        .overview
        .handle(GetPatientOverviewQuery { patient_id })
        .await
        .unwrap();
    assert_eq!(overview.latest_conversation_id, Some(conversation_id));
    assert_eq!(overview.symptom_rows.len(), 4);
    assert_eq!(overview.symptom_rows[0].likert_score, Some(4));
    assert_eq!(overview.symptom_rows[1].response, "Not reported");
    assert_eq!(overview.symptom_rows[2].likert_score, Some(6));
    assert_eq!(overview.conversations.len(), 1);

    let err = c
        .submit
        .handle(SubmitResponseCommand::new("one more thing"))
        .await
        .unwrap_err();
    assert!(matches!(err, InterviewError::InterviewComplete));
}

#[tokio::test]
async fn provider_outage_still_saves_the_conversation() {
    let c = clinic();
    c.provider.push_response("Hello!");
    for _ in 0..6 {
        c.provider.push_error(GenerationError::Unavailable {
            message: "overloaded".to_string(),
        });
    }

    c.start
        .handle(StartInterviewCommand {
            patient_id: PatientId::new(1),
        })
        .await
        .unwrap();

    let mut view = None;
    for reply in ["no", "no", "no", "no"] {
        view = Some(answer(&c, reply).await);
    }
    let view = view.unwrap();

    assert!(view.complete);
    assert_eq!(c.store.conversation_count().await, 1);
    assert_eq!(c.store.symptom_count().await, 0);

    let detail = c
        .detail
        .handle(GetConversationDetailQuery {
            conversation_id: view.conversation_id.unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(detail.conversation.summary, "Summary generation failed.");
}

#[tokio::test]
async fn restarting_discards_the_unfinished_session() {
    let c = clinic();
    c.provider.push_response("Hello, patient 1");
    c.provider.push_response("Thanks.");
    c.provider.push_response("Hello, patient 3");

    c.start
        .handle(StartInterviewCommand {
            patient_id: PatientId::new(1),
        })
        .await
        .unwrap();
    answer(&c, "yes").await;

    let view = c
        .start
        .handle(StartInterviewCommand {
            patient_id: PatientId::new(3),
        })
        .await
        .unwrap();

    assert_eq!(view.patient_id, PatientId::new(3));
    assert_eq!(view.transcript.len(), 1);
    assert_eq!(c.store.conversation_count().await, 0);
}
