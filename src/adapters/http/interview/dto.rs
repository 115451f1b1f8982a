//! HTTP DTOs for interview endpoints.

use serde::Deserialize;

/// Request to begin a check-in for a patient.
#[derive(Debug, Clone, Deserialize)]
pub struct StartInterviewRequest {
    pub patient_id: u32,
}

/// A patient reply.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponseRequest {
    pub text: String,
}
