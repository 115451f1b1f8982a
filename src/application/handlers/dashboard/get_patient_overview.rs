//! GetPatientOverviewHandler - Query handler for a patient's dashboard card.
//!
//! Shows the latest conversation's answer to each catalog question, plus
//! the patient's full conversation list.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::catalog::{DisplayColor, QuestionCatalog};
use crate::domain::clinic::{Conversation, Patient};
use crate::domain::foundation::{ConversationId, PatientId, Timestamp};
use crate::ports::ClinicStore;

use super::DashboardError;

/// Shown for a catalog question the latest conversation has no symptom for.
pub const NOT_REPORTED: &str = "Not reported";

#[derive(Debug, Clone)]
pub struct GetPatientOverviewQuery {
    pub patient_id: PatientId,
}

/// One catalog question as reported in the latest conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomRow {
    pub question: String,
    /// The symptom's color if reported, otherwise the question's.
    pub color: DisplayColor,
    pub response: String,
    pub likert_score: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationListItem {
    pub id: ConversationId,
    pub created_at: Timestamp,
    /// "YYYY-MM-DD HH:MM" for pickers.
    pub label: String,
    pub summary: String,
}

impl From<&Conversation> for ConversationListItem {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id,
            created_at: conversation.created_at,
            label: conversation.created_at.display_minutes(),
            summary: conversation.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientOverview {
    pub patient: Patient,
    pub latest_conversation_id: Option<ConversationId>,
    /// Empty when the patient has no conversations.
    pub symptom_rows: Vec<SymptomRow>,
    pub conversations: Vec<ConversationListItem>,
}

pub struct GetPatientOverviewHandler {
    store: Arc<dyn ClinicStore>,
    catalog: Arc<QuestionCatalog>,
}

impl GetPatientOverviewHandler {
    pub fn new(store: Arc<dyn ClinicStore>, catalog: Arc<QuestionCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn handle(
        &self,
        query: GetPatientOverviewQuery,
    ) -> Result<PatientOverview, DashboardError> {
        let patient = self
            .store
            .find_patient(query.patient_id)
            .await?
            .ok_or(DashboardError::PatientNotFound(query.patient_id))?;

        let conversations = self.store.conversations_for_patient(patient.id).await?;

        let latest = conversations
            .iter()
            .fold(None::<&Conversation>, |best, c| match best {
                Some(b) if !c.is_newer_than(b) => Some(b),
                _ => Some(c),
            });

        let symptom_rows = match latest {
            Some(conversation) => {
                let symptoms = self.store.symptoms_for_conversation(conversation.id).await?;
                self.catalog
                    .iter()
                    .map(|question| {
                        match symptoms.iter().find(|s| s.question_text == question.text()) {
                            Some(symptom) => SymptomRow {
                                question: question.text().to_string(),
                                color: symptom.display_color,
                                response: symptom.patient_response_text.clone(),
                                likert_score: symptom.likert_score,
                            },
                            None => SymptomRow {
                                question: question.text().to_string(),
                                color: question.display_color(),
                                response: NOT_REPORTED.to_string(),
                                likert_score: None,
                            },
                        }
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(PatientOverview {
            latest_conversation_id: latest.map(|c| c.id),
            symptom_rows,
            conversations: conversations.iter().map(ConversationListItem::from).collect(),
            patient,
        })
    }
}
