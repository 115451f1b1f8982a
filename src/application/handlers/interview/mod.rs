//! Patient interview handlers.
//!
//! One interview is active per process. Starting a new one discards the
//! previous session; finishing one saves the conversation and runs the
//! enrichment passes.

mod active_interview;
mod error;
mod get_interview;
mod start_interview;
mod submit_response;

pub use active_interview::{ActiveInterview, InterviewSlot, InterviewView};
pub use error::InterviewError;
pub use get_interview::{GetInterviewHandler, GetInterviewQuery};
pub use start_interview::{StartInterviewCommand, StartInterviewHandler};
pub use submit_response::{SubmitResponseCommand, SubmitResponseHandler};
