//! Dialogue state for one active check-in.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::{PatientId, StateMachine};

use super::classifier::{AnswerClassification, ResponseClassifier};
use super::prompt::compose_dialogue_prompt;
use super::question_status::QuestionStatus;
use super::transcript::{ConversationTurn, Transcript};

/// Status of one catalog question within the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionProgress {
    pub question: String,
    pub status: QuestionStatus,
}

/// Everything one check-in session knows.
///
/// `progress` holds exactly one entry per catalog question, in catalog
/// order. The current question is the first one not yet `Discussed`, and
/// is recomputed from `progress` after every turn; an `InDiscussion`
/// question therefore stays current until it is settled.
#[derive(Debug, Clone)]
pub struct DialogueState {
    patient_id: PatientId,
    catalog: Arc<QuestionCatalog>,
    transcript: Transcript,
    progress: Vec<QuestionProgress>,
    current_question: Option<String>,
}

impl DialogueState {
    /// Creates an empty session for a patient.
    pub fn new(patient_id: PatientId, catalog: Arc<QuestionCatalog>) -> Self {
        let progress = catalog
            .iter()
            .map(|q| QuestionProgress {
                question: q.text().to_string(),
                status: QuestionStatus::NotDiscussed,
            })
            .collect();

        let mut state = Self {
            patient_id,
            catalog,
            transcript: Transcript::new(),
            progress,
            current_question: None,
        };
        state.recompute_current();
        state
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn progress(&self) -> &[QuestionProgress] {
        &self.progress
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    pub fn status_of(&self, question: &str) -> Option<QuestionStatus> {
        self.progress
            .iter()
            .find(|p| p.question == question)
            .map(|p| p.status)
    }

    /// True once every catalog question is `Discussed`.
    pub fn is_complete(&self) -> bool {
        self.current_question.is_none()
    }

    /// Applies a patient reply: records it, classifies it against the
    /// current question, and recomputes the current question.
    ///
    /// An empty reply (the greeting request) records nothing and
    /// classifies nothing.
    pub fn apply_user_input(&mut self, user_text: &str, classifier: &dyn ResponseClassifier) {
        if user_text.is_empty() {
            self.recompute_current();
            return;
        }

        self.transcript.push(ConversationTurn::user(user_text));

        if let Some(current) = self.current_question.clone() {
            let classification = match self.catalog.find(&current) {
                Some(question) => classifier.classify(question, user_text),
                None => AnswerClassification::Unresolved,
            };
            let target = match classification {
                AnswerClassification::Resolved => QuestionStatus::Discussed,
                AnswerClassification::Unresolved => QuestionStatus::InDiscussion,
            };
            self.set_status(&current, target);
        }

        self.recompute_current();
    }

    /// Prompt for the next bot turn, built from the current state.
    pub fn compose_prompt(&self) -> String {
        compose_dialogue_prompt(&self.catalog, &self.transcript, self.current_question())
    }

    /// Appends the bot's reply.
    pub fn record_assistant_turn(&mut self, text: impl Into<String>) {
        self.transcript.push(ConversationTurn::assistant(text));
    }

    fn set_status(&mut self, question: &str, target: QuestionStatus) {
        if let Some(entry) = self.progress.iter_mut().find(|p| p.question == question) {
            // Discussed questions are closed; an invalid transition is a no-op
            if let Ok(next) = entry.status.transition_to(target) {
                entry.status = next;
            }
        }
    }

    fn recompute_current(&mut self) {
        self.current_question = self
            .progress
            .iter()
            .find(|p| !p.status.is_resolved())
            .map(|p| p.question.clone());
    }
}
