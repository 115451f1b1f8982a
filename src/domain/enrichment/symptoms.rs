//! Symptom extraction prompt and catalog matching.

use serde::Deserialize;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::clinic::NewSymptomRecord;
use crate::domain::foundation::ConversationId;

const LIKERT_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

const EXTRACTION_TEMPLATE: &str = r#"Analyze this conversation and extract symptom information. Return JSON format:
{
    "symptoms": [{
        "question": "original question text",
        "response": "patient's answer",
        "severity": "from question config",
        "color": "from question config",
        "likert": "1-10 rating if the patient gave one, otherwise null"
    }]
}

Conversation Log: {log}"#;

/// Builds the extraction prompt around a JSON-serialized transcript.
pub fn extraction_prompt(transcript_json: &str) -> String {
    EXTRACTION_TEMPLATE.replace("{log}", transcript_json)
}

/// Decoded extraction document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExtractedSymptoms {
    pub symptoms: Vec<ExtractedSymptom>,
}

/// One item as the model reported it. Severity and color echoed by the
/// model are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExtractedSymptom {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub likert: Option<serde_json::Value>,
}

impl ExtractedSymptom {
    /// Likert score if the model gave an integer (or numeric string) in 1..=10.
    pub fn likert_score(&self) -> Option<u8> {
        let score = match self.likert.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|v| u8::try_from(v).ok()),
            serde_json::Value::String(s) => s.trim().parse::<u8>().ok(),
            _ => None,
        }?;
        LIKERT_RANGE.contains(&score).then_some(score)
    }
}

/// Keeps the items whose question exactly matches a catalog question.
///
/// Severity tier and display color are taken from the catalog, never from
/// the model output.
pub fn match_to_catalog(
    conversation_id: ConversationId,
    catalog: &QuestionCatalog,
    extracted: &ExtractedSymptoms,
) -> Vec<NewSymptomRecord> {
    extracted
        .symptoms
        .iter()
        .filter_map(|item| {
            catalog.find(&item.question).map(|question| {
                NewSymptomRecord::for_question(
                    conversation_id,
                    question,
                    item.response.clone(),
                    item.likert_score(),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{reference_catalog, DisplayColor, SeverityTier};
    use crate::domain::enrichment::StructuredDecoder;
    use serde_json::json;

    fn item(question: &str, likert: Option<serde_json::Value>) -> ExtractedSymptom {
        ExtractedSymptom {
            question: question.to_string(),
            response: "yes".to_string(),
            likert,
        }
    }

    mod prompt {
        use super::*;

        #[test]
        fn embeds_conversation_log() {
            let prompt = extraction_prompt(r#"[{"role":"user","content":"yes"}]"#);
            assert!(prompt.contains(r#"Conversation Log: [{"role":"user","content":"yes"}]"#));
            assert!(prompt.contains("\"symptoms\""));
        }
    }

    mod likert {
        use super::*;

        #[test]
        fn accepts_integer_in_range() {
            assert_eq!(item("q", Some(json!(7))).likert_score(), Some(7));
        }

        #[test]
        fn accepts_numeric_string() {
            assert_eq!(item("q", Some(json!(" 10 "))).likert_score(), Some(10));
        }

        #[test]
        fn rejects_out_of_range() {
            assert_eq!(item("q", Some(json!(0))).likert_score(), None);
            assert_eq!(item("q", Some(json!(11))).likert_score(), None);
            assert_eq!(item("q", Some(json!(300))).likert_score(), None);
        }

        #[test]
        fn rejects_non_integers() {
            assert_eq!(item("q", Some(json!(4.5))).likert_score(), None);
            assert_eq!(item("q", Some(json!("severe"))).likert_score(), None);
            assert_eq!(item("q", Some(json!(null))).likert_score(), None);
            assert_eq!(item("q", None).likert_score(), None);
        }
    }

    mod matching {
        use super::*;

        #[test]
        fn drops_items_without_exact_catalog_match() {
            let extracted = ExtractedSymptoms {
                symptoms: vec![
                    item("Are you having difficulty breathing?", None),
                    item("are you having difficulty breathing?", None),
                    item("Do you have a headache?", None),
                ],
            };

            let records = match_to_catalog(ConversationId::new(1), &reference_catalog(), &extracted);

            assert_eq!(records.len(), 1);
            assert_eq!(records[0].question_text, "Are you having difficulty breathing?");
        }

        #[test]
        fn uses_catalog_metadata_over_model_output() {
            let raw = r#"{"symptoms": [{
                "question": "Have you had persistent constipation, nausea, or vomiting?",
                "response": "some nausea",
                "severity": "most_severe",
                "color": "red",
                "likert": 4
            }]}"#;
            let extracted: ExtractedSymptoms = StructuredDecoder::new().decode(raw).unwrap();

            let records = match_to_catalog(ConversationId::new(2), &reference_catalog(), &extracted);

            assert_eq!(records.len(), 1);
            assert_eq!(records[0].severity_tier, SeverityTier::Moderate);
            assert_eq!(records[0].display_color, DisplayColor::Yellow);
            assert_eq!(records[0].patient_response_text, "some nausea");
            assert_eq!(records[0].likert_score, Some(4));
            assert_eq!(records[0].conversation_id, ConversationId::new(2));
        }

        #[test]
        fn missing_question_is_dropped() {
            let raw = r#"{"symptoms": [{"response": "fine"}]}"#;
            let extracted: ExtractedSymptoms = StructuredDecoder::new().decode(raw).unwrap();

            let records = match_to_catalog(ConversationId::new(1), &reference_catalog(), &extracted);
            assert!(records.is_empty());
        }
    }
}
