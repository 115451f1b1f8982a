//! Answer classification strategy.
//!
//! Decides whether a patient's reply settled the question that was being
//! asked. The sequencer only sees the [`ResponseClassifier`] trait, so the
//! keyword heuristic can be replaced by real intent classification without
//! touching the status state machine.

use std::fmt::Debug;
use std::ops::RangeInclusive;

use crate::domain::catalog::Question;

/// Outcome of classifying one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerClassification {
    /// The reply answered the question.
    Resolved,
    /// The reply did not settle the question yet.
    Unresolved,
}

/// Strategy for deciding whether a reply resolves a question.
pub trait ResponseClassifier: Send + Sync + Debug {
    fn classify(&self, question: &Question, answer: &str) -> AnswerClassification;
}

/// Substring heuristic: a reply resolves its question when it mentions an
/// affirmation/negation keyword or a number on the severity scale.
///
/// Matching is plain substring containment, so "know" or "nothing" count
/// as "no", and "2024" contains "2". Combined answers such as
/// "yes, started yesterday, severity 8" are treated as resolved on the
/// first hit without looking at the rest.
#[derive(Debug, Clone)]
pub struct KeywordDigitClassifier {
    keywords: Vec<String>,
    scale: RangeInclusive<u8>,
}

impl Default for KeywordDigitClassifier {
    fn default() -> Self {
        Self {
            keywords: vec!["yes".to_string(), "no".to_string()],
            scale: 1..=10,
        }
    }
}

impl KeywordDigitClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the keyword list. Keywords are compared lowercased.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords.into_iter().map(|k| k.to_lowercase()).collect();
        self
    }

    /// Replaces the numeric scale.
    pub fn with_scale(mut self, scale: RangeInclusive<u8>) -> Self {
        self.scale = scale;
        self
    }

    fn mentions_keyword(&self, answer: &str) -> bool {
        let lowered = answer.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    fn mentions_scale_value(&self, answer: &str) -> bool {
        self.scale
            .clone()
            .any(|n| answer.contains(n.to_string().as_str()))
    }
}

impl ResponseClassifier for KeywordDigitClassifier {
    fn classify(&self, _question: &Question, answer: &str) -> AnswerClassification {
        if self.mentions_keyword(answer) || self.mentions_scale_value(answer) {
            AnswerClassification::Resolved
        } else {
            AnswerClassification::Unresolved
        }
    }
}
