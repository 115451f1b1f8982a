//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The dialogue sequencer and the enrichment passes live here because they
//! call the text-generation port; the domain stays pure.

pub mod enrichment;
pub mod handlers;
mod sequencer;

pub use sequencer::DialogueSequencer;
