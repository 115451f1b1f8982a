//! Response sanitization and strict structured decoding.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Maximum allowed response length (100KB).
pub const MAX_RESPONSE_LENGTH: usize = 100_000;

/// Maximum length for individual string fields in decoded data (10KB).
pub const MAX_FIELD_LENGTH: usize = 10_000;

/// Errors that can occur during sanitization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizationError {
    #[error("Response too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },
}

/// The model's output was not the structured data that was asked for.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructuredParseError {
    #[error("Sanitization failed: {0}")]
    Sanitization(#[from] SanitizationError),

    #[error("Response contained no JSON document")]
    NoJson,

    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("Schema mismatch: {0}")]
    Schema(String),
}

/// Strips control characters and prompt-injection markers from model output.
#[derive(Debug, Clone, Default)]
pub struct ResponseSanitizer {
    additional_patterns: Vec<String>,
}

impl ResponseSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds patterns to strip on top of the built-in markers.
    pub fn with_additional_patterns(mut self, patterns: Vec<String>) -> Self {
        self.additional_patterns = patterns;
        self
    }

    pub fn sanitize(&self, response: &str) -> Result<String, SanitizationError> {
        if response.len() > MAX_RESPONSE_LENGTH {
            return Err(SanitizationError::TooLong {
                max: MAX_RESPONSE_LENGTH,
                actual: response.len(),
            });
        }

        let cleaned: String = response
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t' || *c == '\r')
            .collect();

        Ok(self.strip_injection_markers(&cleaned))
    }

    fn strip_injection_markers(&self, s: &str) -> String {
        let patterns = [
            "```system",
            "```assistant",
            "[INST]",
            "[/INST]",
            "<|system|>",
            "<|assistant|>",
            "<|user|>",
            "<|im_start|>",
            "<|im_end|>",
            "<<SYS>>",
            "<</SYS>>",
        ];

        let mut result = s.to_string();
        for pattern in patterns {
            result = result.replace(pattern, "");
        }
        for pattern in &self.additional_patterns {
            result = result.replace(pattern.as_str(), "");
        }
        result
    }
}

/// Locates a JSON document in free-form model output and decodes it into
/// a declared schema type.
#[derive(Debug, Clone, Default)]
pub struct StructuredDecoder {
    sanitizer: ResponseSanitizer,
}

impl StructuredDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize, locate, parse, then decode against `T`.
    ///
    /// Parsing and schema decoding are separate steps so that "not JSON"
    /// and "JSON of the wrong shape" are reported distinctly.
    pub fn decode<T: DeserializeOwned>(&self, response: &str) -> Result<T, StructuredParseError> {
        let sanitized = self.sanitizer.sanitize(response)?;
        let json = locate_json(&sanitized).ok_or(StructuredParseError::NoJson)?;

        let value: serde_json::Value =
            serde_json::from_str(&json).map_err(|e| StructuredParseError::Json(e.to_string()))?;
        let value = clean_strings(value);

        serde_json::from_value(value).map_err(|e| StructuredParseError::Schema(e.to_string()))
    }
}

/// Finds the JSON payload: a fenced code block first, otherwise the first
/// balanced object or array.
fn locate_json(response: &str) -> Option<String> {
    let trimmed = response.trim();

    if let Some(json) = extract_from_code_block(trimmed) {
        return Some(json);
    }

    let obj_start = trimmed.find('{');
    let arr_start = trimmed.find('[');
    let (start, open, close) = match (obj_start, arr_start) {
        (Some(o), Some(a)) if a < o => (a, '[', ']'),
        (Some(o), _) => (o, '{', '}'),
        (None, Some(a)) => (a, '[', ']'),
        (None, None) => return None,
    };

    extract_balanced(trimmed, start, open, close)
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let body_start = start + pattern.len();
            if let Some(end) = s[body_start..].find("```") {
                return Some(s[body_start..body_start + end].trim().to_string());
            }
        }
    }
    None
}

fn extract_balanced(s: &str, start: usize, open: char, close: char) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(s[start..end].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Truncates long string values anywhere in the document.
fn clean_strings(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::String(s) => Value::String(clean_field(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(clean_strings).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, clean_strings(v)))
                .collect(),
        ),
        other => other,
    }
}

fn clean_field(s: &str) -> String {
    if s.len() <= MAX_FIELD_LENGTH {
        return s.to_string();
    }
    let mut cut = MAX_FIELD_LENGTH;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...[truncated]", &s[..cut])
}
