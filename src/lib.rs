//! RECOVER - Postoperative Symptom Check-in
//!
//! A patient answers a fixed set of symptom questions in a guided chat; the
//! finished transcript is mined for structured symptom records and a short
//! summary, which clinicians review on a dashboard alongside a per-patient
//! severity status.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
