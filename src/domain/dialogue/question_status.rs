//! Per-question discussion status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// How far a catalog question has been covered in the current session.
///
/// - `NotDiscussed`: not asked yet
/// - `InDiscussion`: asked, but the reply did not settle it
/// - `Discussed`: settled; never asked again this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    #[default]
    NotDiscussed,
    InDiscussion,
    Discussed,
}

impl QuestionStatus {
    /// Returns true once the question is closed for the session.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Discussed)
    }
}

impl StateMachine for QuestionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use QuestionStatus::*;
        matches!(
            (self, target),
            (NotDiscussed, InDiscussion)
                | (NotDiscussed, Discussed)
                // Follow-up turns may keep a question open
                | (InDiscussion, InDiscussion)
                | (InDiscussion, Discussed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use QuestionStatus::*;
        match self {
            NotDiscussed => vec![InDiscussion, Discussed],
            InDiscussion => vec![InDiscussion, Discussed],
            Discussed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_not_discussed() {
        assert_eq!(QuestionStatus::default(), QuestionStatus::NotDiscussed);
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&QuestionStatus::InDiscussion).unwrap();
        assert_eq!(json, "\"in_discussion\"");
    }

    #[test]
    fn not_discussed_can_open_or_close() {
        let status = QuestionStatus::NotDiscussed;
        assert!(status.can_transition_to(&QuestionStatus::InDiscussion));
        assert!(status.can_transition_to(&QuestionStatus::Discussed));
    }

    #[test]
    fn in_discussion_loops_on_itself() {
        let status = QuestionStatus::InDiscussion;
        assert_eq!(
            status.transition_to(QuestionStatus::InDiscussion),
            Ok(QuestionStatus::InDiscussion)
        );
    }

    #[test]
    fn nothing_moves_backwards() {
        assert!(!QuestionStatus::InDiscussion.can_transition_to(&QuestionStatus::NotDiscussed));
        assert!(!QuestionStatus::Discussed.can_transition_to(&QuestionStatus::InDiscussion));
        assert!(!QuestionStatus::Discussed.can_transition_to(&QuestionStatus::NotDiscussed));
    }

    #[test]
    fn discussed_is_terminal() {
        assert!(QuestionStatus::Discussed.is_terminal());
        assert!(QuestionStatus::Discussed.is_resolved());
        assert!(!QuestionStatus::InDiscussion.is_resolved());
    }

    #[test]
    fn valid_transitions_matches_can_transition_to() {
        for status in [
            QuestionStatus::NotDiscussed,
            QuestionStatus::InDiscussion,
            QuestionStatus::Discussed,
        ] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target), "{:?} -> {:?}", status, target);
            }
        }
    }
}
