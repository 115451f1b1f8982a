//! Interview handler errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, PatientId};

#[derive(Debug, Clone, Error)]
pub enum InterviewError {
    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    #[error("No interview is in progress")]
    NoActiveInterview,

    /// Every question has been discussed; start a new interview.
    #[error("Interview is complete and cannot accept new responses")]
    InterviewComplete,

    #[error("Validation error: response cannot be empty")]
    EmptyResponse,

    #[error("Store error: {0}")]
    Store(String),

    /// The detached turn task panicked or was cancelled.
    #[error("Interview turn failed: {0}")]
    TurnFailed(String),
}

impl From<DomainError> for InterviewError {
    fn from(err: DomainError) -> Self {
        InterviewError::Store(err.to_string())
    }
}
