//! UpdatePatientSeverityHandler - Command handler for the clinician's
//! status call.

use std::sync::Arc;

use crate::domain::clinic::{Patient, SeverityStatus};
use crate::domain::foundation::PatientId;
use crate::ports::ClinicStore;

use super::DashboardError;

#[derive(Debug, Clone)]
pub struct UpdatePatientSeverityCommand {
    pub patient_id: PatientId,
    pub severity_status: SeverityStatus,
}

pub struct UpdatePatientSeverityHandler {
    store: Arc<dyn ClinicStore>,
}

impl UpdatePatientSeverityHandler {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: UpdatePatientSeverityCommand) -> Result<Patient, DashboardError> {
        if self.store.find_patient(cmd.patient_id).await?.is_none() {
            return Err(DashboardError::PatientNotFound(cmd.patient_id));
        }

        let patient = self
            .store
            .update_patient_severity(cmd.patient_id, cmd.severity_status)
            .await?;

        tracing::info!(
            patient_id = %patient.id,
            severity_status = %patient.severity_status,
            "patient severity updated"
        );
        Ok(patient)
    }
}
