//! Prompt composition for the check-in dialogue.

use crate::domain::catalog::QuestionCatalog;

use super::transcript::Transcript;

/// Shown to the patient when the text-generation call fails.
pub const FALLBACK_RESPONSE: &str = "Sorry, I'm having trouble processing that. Please try again.";

/// What the bot says once every question is covered.
pub const COMPLETION_MESSAGE: &str = "Thank you! Your doctor will review this.";

/// Hard-coded emergency redirect.
pub const EMERGENCY_MESSAGE: &str = "Please call 911 immediately.";

const SYSTEM_TEMPLATE: &str = r#"
You are RECOVER Bot, a friendly conversational agent for postoperative gastrointestinal cancer patients to report symptoms daily. Follow these steps:

1. **Greeting**: Start with a friendly greeting and immediately ask the first question.
   Example: "Hi there! Let's start today's symptom check. {first_question}"

2. **Question Flow**: Ask these questions one at a time in order:
{questions}

3. **Follow-ups**: If patient reports a symptom:
   - Ask "When did it start?"
   - Ask "How severe is it (1-10)?"

4. **Clarifications**: Explain medical terms in simple language.
   Example: "Constipation means having fewer bowel movements than usual."

5. **Completion**: After all questions, say: "{completion}"

Never provide medical advice. For emergencies, say: "{emergency}"
"#;

/// Fixed instructions: catalog, tone rules, emergency script, no advice.
pub fn system_instructions(catalog: &QuestionCatalog) -> String {
    let questions = catalog
        .iter()
        .map(|q| format!("- {}", q.text()))
        .collect::<Vec<_>>()
        .join("\n");
    let first_question = catalog.iter().next().map(|q| q.text()).unwrap_or_default();

    SYSTEM_TEMPLATE
        .replace("{first_question}", first_question)
        .replace("{questions}", &questions)
        .replace("{completion}", COMPLETION_MESSAGE)
        .replace("{emergency}", EMERGENCY_MESSAGE)
}

/// Builds the full generation prompt for the next bot turn.
///
/// Layout: system instructions, the transcript as `Role: content` lines,
/// then a hint naming the question to ask next. The hint is left out once
/// the catalog is exhausted, which cues the completion message.
pub fn compose_dialogue_prompt(
    catalog: &QuestionCatalog,
    transcript: &Transcript,
    next_question: Option<&str>,
) -> String {
    let mut parts = Vec::with_capacity(transcript.len() + 3);
    parts.push(system_instructions(catalog));
    parts.push("\nConversation History:".to_string());

    for turn in transcript.turns() {
        parts.push(format!("\n{}: {}", turn.role.label(), turn.content));
    }

    if let Some(question) = next_question {
        parts.push(format!("\nASSISTANT: [Next question to ask: {}]", question));
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::reference_catalog;
    use crate::domain::dialogue::ConversationTurn;

    #[test]
    fn system_instructions_list_every_question() {
        let catalog = reference_catalog();
        let text = system_instructions(&catalog);

        for question in catalog.iter() {
            assert!(text.contains(&format!("- {}", question.text())));
        }
    }

    #[test]
    fn system_instructions_carry_safety_rules() {
        let text = system_instructions(&reference_catalog());

        assert!(text.contains("Never provide medical advice."));
        assert!(text.contains(EMERGENCY_MESSAGE));
        assert!(text.contains(COMPLETION_MESSAGE));
        assert!(text.contains("How severe is it (1-10)?"));
    }

    #[test]
    fn prompt_renders_transcript_lines_in_order() {
        let transcript = Transcript::from(vec![
            ConversationTurn::assistant("Hi there!"),
            ConversationTurn::user("Yes"),
        ]);

        let prompt = compose_dialogue_prompt(&reference_catalog(), &transcript, None);

        let history = prompt.find("Conversation History:").unwrap();
        let assistant = prompt.find("\nAssistant: Hi there!").unwrap();
        let user = prompt.find("\nUser: Yes").unwrap();
        assert!(history < assistant && assistant < user);
    }

    #[test]
    fn prompt_ends_with_next_question_hint() {
        let prompt = compose_dialogue_prompt(
            &reference_catalog(),
            &Transcript::new(),
            Some("Are you having difficulty breathing?"),
        );

        assert!(prompt.ends_with("ASSISTANT: [Next question to ask: Are you having difficulty breathing?]"));
    }

    #[test]
    fn prompt_omits_hint_when_exhausted() {
        let prompt = compose_dialogue_prompt(&reference_catalog(), &Transcript::new(), None);
        assert!(!prompt.contains("Next question to ask"));
    }
}
