//! Clinic domain module.
//!
//! Records the clinician dashboard reads: patients, saved conversations,
//! and the symptom records extracted from them.

mod conversation;
mod patient;
mod symptom;

pub use conversation::Conversation;
pub use patient::{Patient, SeverityStatus};
pub use symptom::{NewSymptomRecord, SymptomRecord};
