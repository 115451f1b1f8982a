//! Patient record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{PatientId, ValidationError};

/// Overall status a clinician assigns to a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeverityStatus {
    #[default]
    Green,
    Yellow,
    Red,
}

impl SeverityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityStatus::Green => "green",
            SeverityStatus::Yellow => "yellow",
            SeverityStatus::Red => "red",
        }
    }
}

impl fmt::Display for SeverityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "green" => Ok(SeverityStatus::Green),
            "yellow" => Ok(SeverityStatus::Yellow),
            "red" => Ok(SeverityStatus::Red),
            other => Err(ValidationError::invalid_format(
                "severity_status",
                format!("expected green, yellow or red, got '{}'", other),
            )),
        }
    }
}

/// A pre-seeded patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub severity_status: SeverityStatus,
}

impl Patient {
    /// Creates a patient with a green status.
    pub fn new(id: PatientId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            name,
            severity_status: SeverityStatus::Green,
        })
    }

    /// The default roster: "Patient 1" .. "Patient N", all green.
    pub fn seed_roster(count: u32) -> Vec<Patient> {
        (1..=count)
            .map(|n| Patient {
                id: PatientId::new(n),
                name: format!("Patient {}", n),
                severity_status: SeverityStatus::Green,
            })
            .collect()
    }
}
