//! HTTP routes for dashboard endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    get_conversation_detail, get_patient_overview, list_patients, update_patient_severity,
    DashboardHandlers,
};

/// Creates the dashboard router.
pub fn dashboard_routes(handlers: DashboardHandlers) -> Router {
    Router::new()
        .route("/api/patients", get(list_patients))
        .route("/api/patients/:id/overview", get(get_patient_overview))
        .route("/api/patients/:id/severity", put(update_patient_severity))
        .route("/api/conversations/:id", get(get_conversation_detail))
        .with_state(handlers)
}
