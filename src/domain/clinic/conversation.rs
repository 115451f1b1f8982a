//! Saved conversation record.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::Transcript;
use crate::domain::foundation::{ConversationId, PatientId, Timestamp};

/// A completed check-in as the dashboard sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub patient_id: PatientId,
    pub created_at: Timestamp,
    pub transcript: Transcript,
    /// Empty until the summarizer records one.
    pub summary: String,
    pub summarized_at: Option<Timestamp>,
}

impl Conversation {
    pub fn new(id: ConversationId, patient_id: PatientId, transcript: Transcript) -> Self {
        Self {
            id,
            patient_id,
            created_at: Timestamp::now(),
            transcript,
            summary: String::new(),
            summarized_at: None,
        }
    }

    pub fn is_summarized(&self) -> bool {
        self.summarized_at.is_some()
    }

    /// True if this conversation should be shown before `other` as the
    /// patient's latest. Ties on time go to the higher id.
    pub fn is_newer_than(&self, other: &Conversation) -> bool {
        (self.created_at, self.id) > (other.created_at, other.id)
    }
}
