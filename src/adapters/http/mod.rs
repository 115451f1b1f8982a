//! HTTP adapters - REST API implementations.
//!
//! The interview and dashboard areas each have their own DTOs, handlers
//! and routes; `AppState` wires them into one router.

mod dto;
pub mod dashboard;
pub mod interview;
mod router;

pub use dto::ErrorResponse;
pub use router::AppState;
