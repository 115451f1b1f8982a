//! Dialogue domain module.
//!
//! Pure state for one patient check-in: the transcript, the per-question
//! discussion status, the answer classification strategy, and prompt
//! composition. No text-generation knowledge lives here.

mod classifier;
mod prompt;
mod question_status;
mod state;
mod transcript;

pub use classifier::{AnswerClassification, KeywordDigitClassifier, ResponseClassifier};
pub use prompt::{
    compose_dialogue_prompt, system_instructions, COMPLETION_MESSAGE, EMERGENCY_MESSAGE,
    FALLBACK_RESPONSE,
};
pub use question_status::QuestionStatus;
pub use state::{DialogueState, QuestionProgress};
pub use transcript::{ConversationTurn, Transcript, TurnRole};
