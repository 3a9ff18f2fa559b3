//! Rating system configuration

use serde::{Deserialize, Serialize};

/// K-factor tiers and starting rating for the Elo calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating given to players created without one
    pub initial_rating: i32,
    /// K-factor below `intermediate_threshold`
    pub provisional_k: i32,
    /// K-factor from `intermediate_threshold` up to `established_threshold`
    pub intermediate_k: i32,
    /// K-factor from `established_threshold` upwards
    pub established_k: i32,
    pub intermediate_threshold: i32,
    pub established_threshold: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1200,
            provisional_k: 40,
            intermediate_k: 32,
            established_k: 16,
            intermediate_threshold: 2000,
            established_threshold: 2400,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.provisional_k <= 0 || self.intermediate_k <= 0 || self.established_k <= 0 {
            return Err(crate::error::LedgerError::ConfigurationError {
                message: "K-factors must be positive".to_string(),
            });
        }

        if self.intermediate_threshold >= self.established_threshold {
            return Err(crate::error::LedgerError::ConfigurationError {
                message: format!(
                    "Intermediate threshold {} must be below established threshold {}",
                    self.intermediate_threshold, self.established_threshold
                ),
            });
        }

        if self.initial_rating < 0 {
            return Err(crate::error::LedgerError::ConfigurationError {
                message: "Initial rating cannot be negative".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RatingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let config = RatingConfig {
            intermediate_threshold: 2400,
            established_threshold: 2000,
            ..RatingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_k() {
        let config = RatingConfig {
            established_k: 0,
            ..RatingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
