//! Dashboard handler errors.

use thiserror::Error;

use crate::domain::foundation::{ConversationId, DomainError, PatientId};

#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<DomainError> for DashboardError {
    fn from(err: DomainError) -> Self {
        DashboardError::Store(err.to_string())
    }
}
