//! HTTP handlers for dashboard endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::dto::ErrorResponse;
use crate::application::handlers::dashboard::{
    DashboardError, GetConversationDetailHandler, GetConversationDetailQuery,
    GetPatientOverviewHandler, GetPatientOverviewQuery, ListPatientsHandler, ListPatientsQuery,
    UpdatePatientSeverityCommand, UpdatePatientSeverityHandler,
};
use crate::domain::clinic::SeverityStatus;
use crate::domain::foundation::{ConversationId, PatientId};

use super::dto::{PatientResponse, UpdateSeverityRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DashboardHandlers {
    list_handler: Arc<ListPatientsHandler>,
    overview_handler: Arc<GetPatientOverviewHandler>,
    severity_handler: Arc<UpdatePatientSeverityHandler>,
    detail_handler: Arc<GetConversationDetailHandler>,
}

impl DashboardHandlers {
    pub fn new(
        list_handler: Arc<ListPatientsHandler>,
        overview_handler: Arc<GetPatientOverviewHandler>,
        severity_handler: Arc<UpdatePatientSeverityHandler>,
        detail_handler: Arc<GetConversationDetailHandler>,
    ) -> Self {
        Self {
            list_handler,
            overview_handler,
            severity_handler,
            detail_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/patients - List every patient
pub async fn list_patients(State(handlers): State<DashboardHandlers>) -> Response {
    match handlers.list_handler.handle(ListPatientsQuery).await {
        Ok(patients) => {
            let response: Vec<PatientResponse> =
                patients.into_iter().map(PatientResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_dashboard_error(e),
    }
}

/// GET /api/patients/:id/overview - Latest symptoms and conversation history
pub async fn get_patient_overview(
    State(handlers): State<DashboardHandlers>,
    Path(patient_id): Path<String>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("patient"),
    };

    match handlers
        .overview_handler
        .handle(GetPatientOverviewQuery { patient_id })
        .await
    {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => handle_dashboard_error(e),
    }
}

/// PUT /api/patients/:id/severity - Set the overall status
pub async fn update_patient_severity(
    State(handlers): State<DashboardHandlers>,
    Path(patient_id): Path<String>,
    Json(req): Json<UpdateSeverityRequest>,
) -> Response {
    let patient_id = match patient_id.parse::<PatientId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("patient"),
    };

    let severity_status = match req.severity_status.parse::<SeverityStatus>() {
        Ok(status) => status,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(
                    ErrorResponse::bad_request(e.to_string())
                        .with_details(serde_json::json!({"allowed": ["green", "yellow", "red"]})),
                ),
            )
                .into_response()
        }
    };

    let cmd = UpdatePatientSeverityCommand {
        patient_id,
        severity_status,
    };

    match handlers.severity_handler.handle(cmd).await {
        Ok(patient) => (StatusCode::OK, Json(PatientResponse::from(patient))).into_response(),
        Err(e) => handle_dashboard_error(e),
    }
}

/// GET /api/conversations/:id - Transcript, summary and symptoms
pub async fn get_conversation_detail(
    State(handlers): State<DashboardHandlers>,
    Path(conversation_id): Path<String>,
) -> Response {
    let conversation_id = match conversation_id.parse::<ConversationId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("conversation"),
    };

    match handlers
        .detail_handler
        .handle(GetConversationDetailQuery { conversation_id })
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => handle_dashboard_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_id(kind: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!("Invalid {} ID", kind))),
    )
        .into_response()
}

fn handle_dashboard_error(error: DashboardError) -> Response {
    match error {
        DashboardError::PatientNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Patient", &id.to_string())),
        )
            .into_response(),
        DashboardError::ConversationNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Conversation", &id.to_string())),
        )
            .into_response(),
        DashboardError::Store(msg) => {
            tracing::error!(error = %msg, "dashboard request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
    }
}
