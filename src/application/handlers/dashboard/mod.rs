//! Clinician dashboard handlers.

mod error;
mod get_conversation_detail;
mod get_patient_overview;
mod list_patients;
mod update_patient_severity;

pub use error::DashboardError;
pub use get_conversation_detail::{
    ConversationDetail, GetConversationDetailHandler, GetConversationDetailQuery,
};
pub use get_patient_overview::{
    ConversationListItem, GetPatientOverviewHandler, GetPatientOverviewQuery, PatientOverview,
    SymptomRow, NOT_REPORTED,
};
pub use list_patients::{ListPatientsHandler, ListPatientsQuery};
pub use update_patient_severity::{UpdatePatientSeverityCommand, UpdatePatientSeverityHandler};
