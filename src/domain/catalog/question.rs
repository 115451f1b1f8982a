//! Clinical question value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinical urgency attached to a catalog question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    #[serde(rename = "most_severe")]
    MostSevere,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl SeverityTier {
    /// Wire label of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::MostSevere => "most_severe",
            SeverityTier::Moderate => "moderate",
            SeverityTier::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color used when rendering a question's answer on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Red,
    Yellow,
    Purple,
}

impl DisplayColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayColor::Red => "red",
            DisplayColor::Yellow => "yellow",
            DisplayColor::Purple => "purple",
        }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clinical question. The text is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    requires_followup_scale: bool,
    severity_tier: SeverityTier,
    display_color: DisplayColor,
}

impl Question {
    /// Creates a new question.
    pub fn new(
        text: impl Into<String>,
        requires_followup_scale: bool,
        severity_tier: SeverityTier,
        display_color: DisplayColor,
    ) -> Self {
        Self {
            text: text.into(),
            requires_followup_scale,
            severity_tier,
            display_color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when a reported symptom should be rated on a 1-10 scale.
    pub fn requires_followup_scale(&self) -> bool {
        self.requires_followup_scale
    }

    pub fn severity_tier(&self) -> SeverityTier {
        self.severity_tier
    }

    pub fn display_color(&self) -> DisplayColor {
        self.display_color
    }
}
