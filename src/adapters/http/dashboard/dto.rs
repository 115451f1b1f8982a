//! HTTP DTOs for dashboard endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::clinic::{Patient, SeverityStatus};

/// Request to set a patient's overall status.
///
/// The status arrives as free text and is parsed case-insensitively so an
/// unknown value yields a 400 rather than a body-rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSeverityRequest {
    pub severity_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientResponse {
    pub id: u32,
    pub name: String,
    pub severity_status: SeverityStatus,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.value(),
            name: patient.name,
            severity_status: patient.severity_status,
        }
    }
}
