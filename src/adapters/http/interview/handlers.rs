//! HTTP handlers for interview endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::dto::ErrorResponse;
use crate::application::handlers::interview::{
    GetInterviewHandler, GetInterviewQuery, InterviewError, StartInterviewCommand,
    StartInterviewHandler, SubmitResponseCommand, SubmitResponseHandler,
};
use crate::domain::foundation::PatientId;

use super::dto::{StartInterviewRequest, SubmitResponseRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InterviewHandlers {
    start_handler: Arc<StartInterviewHandler>,
    submit_handler: Arc<SubmitResponseHandler>,
    get_handler: Arc<GetInterviewHandler>,
}

impl InterviewHandlers {
    pub fn new(
        start_handler: Arc<StartInterviewHandler>,
        submit_handler: Arc<SubmitResponseHandler>,
        get_handler: Arc<GetInterviewHandler>,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            get_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/interview - Start a check-in and return the greeting
pub async fn start_interview(
    State(handlers): State<InterviewHandlers>,
    Json(req): Json<StartInterviewRequest>,
) -> Response {
    let cmd = StartInterviewCommand {
        patient_id: PatientId::new(req.patient_id),
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/interview - Current check-in state
pub async fn get_interview(State(handlers): State<InterviewHandlers>) -> Response {
    match handlers.get_handler.handle(GetInterviewQuery).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/interview/responses - Submit a patient reply
pub async fn submit_response(
    State(handlers): State<InterviewHandlers>,
    Json(req): Json<SubmitResponseRequest>,
) -> Response {
    match handlers
        .submit_handler
        .handle(SubmitResponseCommand::new(req.text))
        .await
    {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_interview_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_interview_error(error: InterviewError) -> Response {
    match error {
        InterviewError::PatientNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Patient", &id.to_string())),
        )
            .into_response(),
        InterviewError::EmptyResponse => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        InterviewError::NoActiveInterview | InterviewError::InterviewComplete => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(error.to_string())),
        )
            .into_response(),
        InterviewError::Store(msg) | InterviewError::TurnFailed(msg) => {
            tracing::error!(error = %msg, "interview request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_not_found_maps_to_404() {
        let response = handle_interview_error(InterviewError::PatientNotFound(PatientId::new(9)));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn empty_response_maps_to_400() {
        let response = handle_interview_error(InterviewError::EmptyResponse);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn session_state_errors_map_to_409() {
        assert_eq!(
            handle_interview_error(InterviewError::NoActiveInterview).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_interview_error(InterviewError::InterviewComplete).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn store_error_maps_to_500() {
        let response = handle_interview_error(InterviewError::Store("disk full".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn failed_turn_maps_to_500() {
        let response =
            handle_interview_error(InterviewError::TurnFailed("task panicked".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
