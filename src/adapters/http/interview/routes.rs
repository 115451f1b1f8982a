//! HTTP routes for interview endpoints.

use axum::{routing::post, Router};

use super::handlers::{get_interview, start_interview, submit_response, InterviewHandlers};

/// Creates the interview router.
pub fn interview_routes(handlers: InterviewHandlers) -> Router {
    Router::new()
        .route("/api/interview", post(start_interview).get(get_interview))
        .route("/api/interview/responses", post(submit_response))
        .with_state(handlers)
}
