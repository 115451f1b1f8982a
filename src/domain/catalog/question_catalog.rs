//! The ordered question catalog.

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::question::{DisplayColor, Question, SeverityTier};

static REFERENCE_CATALOG: Lazy<Arc<QuestionCatalog>> = Lazy::new(|| {
    Arc::new(QuestionCatalog::new(vec![
        Question::new(
            "Are you having difficulty breathing?",
            true,
            SeverityTier::MostSevere,
            DisplayColor::Red,
        ),
        Question::new(
            "Are you having a fever of over 100 degrees, or chills?",
            false,
            SeverityTier::MostSevere,
            DisplayColor::Red,
        ),
        Question::new(
            "Have you had persistent constipation, nausea, or vomiting?",
            true,
            SeverityTier::Moderate,
            DisplayColor::Yellow,
        ),
        Question::new(
            "Is there anything else you’d like to comment on?",
            false,
            SeverityTier::NotApplicable,
            DisplayColor::Purple,
        ),
    ]))
});

/// Returns the catalog used for every postoperative check-in.
pub fn reference_catalog() -> Arc<QuestionCatalog> {
    Arc::clone(&REFERENCE_CATALOG)
}

/// Immutable, ordered list of clinical questions. Order is interview order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Builds a catalog. Questions with a text already present are skipped
    /// so that text stays a unique key.
    pub fn new(questions: Vec<Question>) -> Self {
        let mut unique: Vec<Question> = Vec::with_capacity(questions.len());
        for question in questions {
            if !unique.iter().any(|q| q.text() == question.text()) {
                unique.push(question);
            }
        }
        Self { questions: unique }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Exact-text lookup.
    pub fn find(&self, text: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.text() == text)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
