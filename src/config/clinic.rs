//! Clinic roster configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ClinicConfig {
    /// Number of patients seeded at startup ("Patient 1".."Patient N")
    #[serde(default = "default_seed_patients")]
    pub seed_patients: u32,
}

impl ClinicConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.seed_patients == 0 || self.seed_patients > 1000 {
            return Err(ValidationError::InvalidSeedPatients);
        }
        Ok(())
    }
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            seed_patients: default_seed_patients(),
        }
    }
}

fn default_seed_patients() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_three_patients() {
        assert_eq!(ClinicConfig::default().seed_patients, 3);
        assert!(ClinicConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_roster() {
        let config = ClinicConfig { seed_patients: 0 };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSeedPatients));
    }
}
