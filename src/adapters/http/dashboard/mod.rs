//! HTTP adapter for the clinician dashboard endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{PatientResponse, UpdateSeverityRequest};
pub use handlers::DashboardHandlers;
pub use routes::dashboard_routes;
