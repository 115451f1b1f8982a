//! Question catalog module.
//!
//! The fixed, ordered list of clinical questions asked in every daily
//! check-in, with the severity tier and display color the dashboard uses.

mod question_catalog;
mod question;

pub use question_catalog::{reference_catalog, QuestionCatalog};
pub use question::{DisplayColor, Question, SeverityTier};
