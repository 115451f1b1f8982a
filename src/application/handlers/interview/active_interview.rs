//! The process-wide interview slot and its read model.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard, OwnedMutexGuard};

use crate::application::DialogueSequencer;
use crate::domain::dialogue::{QuestionProgress, Transcript};
use crate::domain::foundation::{ConversationId, PatientId};

/// A running (or just finished) check-in.
#[derive(Debug)]
pub struct ActiveInterview {
    pub sequencer: DialogueSequencer,
    /// Set once the finished transcript has been saved.
    pub conversation_id: Option<ConversationId>,
}

impl ActiveInterview {
    pub fn new(sequencer: DialogueSequencer) -> Self {
        Self {
            sequencer,
            conversation_id: None,
        }
    }

    pub fn view(&self) -> InterviewView {
        InterviewView {
            patient_id: self.sequencer.patient_id(),
            transcript: self.sequencer.transcript().clone(),
            current_question: self.sequencer.current_question().map(str::to_string),
            progress: self.sequencer.progress().to_vec(),
            complete: self.sequencer.is_complete(),
            conversation_id: self.conversation_id,
        }
    }
}

/// Holds at most one active interview.
///
/// Requests lock the slot for a whole turn, so turns never interleave.
#[derive(Debug, Clone, Default)]
pub struct InterviewSlot {
    inner: Arc<Mutex<Option<ActiveInterview>>>,
}

impl InterviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, Option<ActiveInterview>> {
        self.inner.lock().await
    }

    /// Lock that can move into a spawned task.
    pub async fn lock_owned(&self) -> OwnedMutexGuard<Option<ActiveInterview>> {
        Arc::clone(&self.inner).lock_owned().await
    }
}

/// What the patient-facing screen renders after each command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewView {
    pub patient_id: PatientId,
    pub transcript: Transcript,
    pub current_question: Option<String>,
    pub progress: Vec<QuestionProgress>,
    pub complete: bool,
    pub conversation_id: Option<ConversationId>,
}
