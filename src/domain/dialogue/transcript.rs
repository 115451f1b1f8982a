//! Conversation transcript.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    /// Label used when the transcript is rendered into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            TurnRole::User => "User",
            TurnRole::Assistant => "Assistant",
        }
    }
}

/// A single immutable turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only sequence of turns for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Number of turns the patient has sent.
    pub fn user_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.role == TurnRole::User).count()
    }

    /// Serialized form stored on saved conversations and sent as the
    /// conversation log in enrichment prompts.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.turns)
    }
}

impl From<Vec<ConversationTurn>> for Transcript {
    fn from(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_order() {
        let mut transcript = Transcript::new();
        transcript.push(ConversationTurn::assistant("Hi there!"));
        transcript.push(ConversationTurn::user("Hello"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].role, TurnRole::Assistant);
        assert_eq!(transcript.last().unwrap().content, "Hello");
        assert_eq!(transcript.user_turn_count(), 1);
    }

    #[test]
    fn serializes_as_role_content_list() {
        let transcript = Transcript::from(vec![
            ConversationTurn::user("yes"),
            ConversationTurn::assistant("When did it start?"),
        ]);

        let json = transcript.to_json().unwrap();
        assert_eq!(
            json,
            r#"[{"role":"user","content":"yes"},{"role":"assistant","content":"When did it start?"}]"#
        );

        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(back, transcript);
    }

    #[test]
    fn role_labels_are_title_case() {
        assert_eq!(TurnRole::User.label(), "User");
        assert_eq!(TurnRole::Assistant.label(), "Assistant");
    }
}
