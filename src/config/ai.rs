//! Text-generation provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Text-generation provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which adapter to wire up
    #[serde(default)]
    pub provider: AiProvider,

    /// Gemini API key (wrapped in a secret at the adapter)
    pub gemini_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    /// Scripted responses; no network
    Mock,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a Gemini key is present
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == AiProvider::Gemini && !self.has_gemini() {
            return Err(ValidationError::MissingRequired("RECOVER__AI__GEMINI_API_KEY"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyModel);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ValidationError::InvalidTemperature);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            temperature: None,
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini_config() -> AiConfig {
        AiConfig {
            gemini_api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Gemini);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_gemini_requires_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("RECOVER__AI__GEMINI_API_KEY"))
        );

        let blank = AiConfig {
            gemini_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        assert!(gemini_config().validate().is_ok());
    }

    #[test]
    fn test_mock_needs_no_key() {
        let config = AiConfig {
            provider: AiProvider::Mock,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = AiConfig {
            base_url: "generativelanguage.googleapis.com".to_string(),
            ..gemini_config()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let config = AiConfig {
            temperature: Some(3.5),
            ..gemini_config()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }
}
