//! Extracted symptom record.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{DisplayColor, Question, SeverityTier};
use crate::domain::foundation::{ConversationId, SymptomId};

/// A symptom record before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSymptomRecord {
    pub conversation_id: ConversationId,
    pub question_text: String,
    pub patient_response_text: String,
    pub likert_score: Option<u8>,
    pub severity_tier: SeverityTier,
    pub display_color: DisplayColor,
}

impl NewSymptomRecord {
    /// Builds a record for a catalog question. Severity and color always
    /// come from the catalog.
    pub fn for_question(
        conversation_id: ConversationId,
        question: &Question,
        patient_response_text: impl Into<String>,
        likert_score: Option<u8>,
    ) -> Self {
        Self {
            conversation_id,
            question_text: question.text().to_string(),
            patient_response_text: patient_response_text.into(),
            likert_score,
            severity_tier: question.severity_tier(),
            display_color: question.display_color(),
        }
    }

    pub fn with_id(self, id: SymptomId) -> SymptomRecord {
        SymptomRecord {
            id,
            conversation_id: self.conversation_id,
            question_text: self.question_text,
            patient_response_text: self.patient_response_text,
            likert_score: self.likert_score,
            severity_tier: self.severity_tier,
            display_color: self.display_color,
        }
    }
}

/// Immutable symptom record shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub id: SymptomId,
    /// Weak reference; the conversation may not exist.
    pub conversation_id: ConversationId,
    pub question_text: String,
    pub patient_response_text: String,
    pub likert_score: Option<u8>,
    pub severity_tier: SeverityTier,
    pub display_color: DisplayColor,
}
