//! Clinic store port.
//!
//! Owns every record the dashboard reads: patients, saved conversations and
//! symptom records. Ids are assigned by the store and never reused.

use async_trait::async_trait;

use crate::domain::clinic::{Conversation, NewSymptomRecord, Patient, SeverityStatus, SymptomRecord};
use crate::domain::dialogue::Transcript;
use crate::domain::foundation::{ConversationId, DomainError, PatientId};

#[async_trait]
pub trait ClinicStore: Send + Sync {
    /// All patients, ordered by id.
    async fn list_patients(&self) -> Result<Vec<Patient>, DomainError>;

    /// Returns `None` if not found.
    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>, DomainError>;

    /// Overwrites the patient's severity status.
    ///
    /// # Errors
    ///
    /// - `PatientNotFound` if the patient doesn't exist
    async fn update_patient_severity(
        &self,
        id: PatientId,
        status: SeverityStatus,
    ) -> Result<Patient, DomainError>;

    /// Saves a finished transcript under the next conversation id.
    async fn save_conversation(
        &self,
        patient_id: PatientId,
        transcript: Transcript,
    ) -> Result<Conversation, DomainError>;

    async fn find_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, DomainError>;

    /// Conversations for a patient, oldest first.
    async fn conversations_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Conversation>, DomainError>;

    /// Records the summary text and stamps `summarized_at`.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    /// - `SummaryAlreadyRecorded` on a second call for the same conversation
    async fn record_summary(
        &self,
        id: ConversationId,
        summary: String,
    ) -> Result<Conversation, DomainError>;

    /// Assigns ids in input order and stores the records.
    async fn save_symptoms(
        &self,
        records: Vec<NewSymptomRecord>,
    ) -> Result<Vec<SymptomRecord>, DomainError>;

    /// Symptom records for a conversation, in insertion order.
    async fn symptoms_for_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<SymptomRecord>, DomainError>;
}
