//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `catalog` - The fixed, ordered list of clinical questions
//! - `dialogue` - Per-question status tracking, transcript and prompt composition
//! - `clinic` - Patients, saved conversations and symptom records
//! - `enrichment` - Post-conversation extraction and summary decoding

pub mod catalog;
pub mod clinic;
pub mod dialogue;
pub mod enrichment;
pub mod foundation;
