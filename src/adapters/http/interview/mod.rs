//! HTTP adapter for the patient check-in endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{StartInterviewRequest, SubmitResponseRequest};
pub use handlers::InterviewHandlers;
pub use routes::interview_routes;
