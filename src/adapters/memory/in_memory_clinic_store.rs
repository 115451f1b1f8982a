//! In-Memory Clinic Store Adapter
//!
//! Keeps patients, conversations and symptom records for the life of the
//! process. Ids start at 1 and are never reused.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::clinic::{Conversation, NewSymptomRecord, Patient, SeverityStatus, SymptomRecord};
use crate::domain::dialogue::Transcript;
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, PatientId, SymptomId, Timestamp,
};
use crate::ports::ClinicStore;

#[derive(Debug, Default)]
struct ClinicTables {
    patients: BTreeMap<PatientId, Patient>,
    conversations: BTreeMap<ConversationId, Conversation>,
    symptoms: Vec<SymptomRecord>,
    last_conversation_id: Option<ConversationId>,
    last_symptom_id: Option<SymptomId>,
}

/// In-memory clinic store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClinicStore {
    tables: Arc<RwLock<ClinicTables>>,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given patients.
    pub fn with_patients(patients: Vec<Patient>) -> Self {
        let tables = ClinicTables {
            patients: patients.into_iter().map(|p| (p.id, p)).collect(),
            ..ClinicTables::default()
        };
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Creates a store seeded with "Patient 1".."Patient N".
    pub fn seeded(count: u32) -> Self {
        Self::with_patients(Patient::seed_roster(count))
    }

    pub async fn conversation_count(&self) -> usize {
        self.tables.read().await.conversations.len()
    }

    pub async fn symptom_count(&self) -> usize {
        self.tables.read().await.symptoms.len()
    }
}

fn patient_not_found(id: PatientId) -> DomainError {
    DomainError::new(ErrorCode::PatientNotFound, format!("Patient {} not found", id))
        .with_detail("patient_id", id.to_string())
}

fn conversation_not_found(id: ConversationId) -> DomainError {
    DomainError::new(
        ErrorCode::ConversationNotFound,
        format!("Conversation {} not found", id),
    )
    .with_detail("conversation_id", id.to_string())
}

#[async_trait]
impl ClinicStore for InMemoryClinicStore {
    async fn list_patients(&self) -> Result<Vec<Patient>, DomainError> {
        Ok(self.tables.read().await.patients.values().cloned().collect())
    }

    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>, DomainError> {
        Ok(self.tables.read().await.patients.get(&id).cloned())
    }

    async fn update_patient_severity(
        &self,
        id: PatientId,
        status: SeverityStatus,
    ) -> Result<Patient, DomainError> {
        let mut tables = self.tables.write().await;
        let patient = tables
            .patients
            .get_mut(&id)
            .ok_or_else(|| patient_not_found(id))?;
        patient.severity_status = status;
        Ok(patient.clone())
    }

    async fn save_conversation(
        &self,
        patient_id: PatientId,
        transcript: Transcript,
    ) -> Result<Conversation, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.patients.contains_key(&patient_id) {
            return Err(patient_not_found(patient_id));
        }

        let id = tables
            .last_conversation_id
            .map(|last| last.next())
            .unwrap_or_else(|| ConversationId::new(1));
        let conversation = Conversation::new(id, patient_id, transcript);

        tables.last_conversation_id = Some(id);
        tables.conversations.insert(id, conversation.clone());
        Ok(conversation)
    }

    async fn find_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, DomainError> {
        Ok(self.tables.read().await.conversations.get(&id).cloned())
    }

    async fn conversations_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Conversation>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .conversations
            .values()
            .filter(|c| c.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn record_summary(
        &self,
        id: ConversationId,
        summary: String,
    ) -> Result<Conversation, DomainError> {
        let mut tables = self.tables.write().await;
        let conversation = tables
            .conversations
            .get_mut(&id)
            .ok_or_else(|| conversation_not_found(id))?;

        if conversation.is_summarized() {
            return Err(DomainError::new(
                ErrorCode::SummaryAlreadyRecorded,
                format!("Conversation {} already has a summary", id),
            ));
        }

        conversation.summary = summary;
        conversation.summarized_at = Some(Timestamp::now());
        Ok(conversation.clone())
    }

    async fn save_symptoms(
        &self,
        records: Vec<NewSymptomRecord>,
    ) -> Result<Vec<SymptomRecord>, DomainError> {
        let mut tables = self.tables.write().await;
        let mut saved = Vec::with_capacity(records.len());

        for record in records {
            let id = tables
                .last_symptom_id
                .map(|last| last.next())
                .unwrap_or_else(|| SymptomId::new(1));
            tables.last_symptom_id = Some(id);

            let record = record.with_id(id);
            tables.symptoms.push(record.clone());
            saved.push(record);
        }

        Ok(saved)
    }

    async fn symptoms_for_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<SymptomRecord>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .symptoms
            .iter()
            .filter(|s| s.conversation_id == conversation_id)
            .cloned()
            .collect())
    }
}
