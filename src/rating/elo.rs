//! Elo rating system implementation
//!
//! This module provides the concrete rating calculator used by the ledger,
//! built on the Elo expected-score function from the skillratings crate with
//! a tiered K-factor: provisional players move fastest, established players
//! slowest.

use crate::config::RatingConfig;
use crate::rating::calculator::RatingCalculator;
use crate::types::Rating;
use skillratings::elo::EloRating;

/// Tiered K-factor Elo calculator
#[derive(Debug, Clone, Default)]
pub struct EloRatingCalculator {
    config: RatingConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn expected_score(&self, player: Rating, opponent: Rating) -> f64 {
        let player = EloRating {
            rating: player as f64,
        };
        let opponent = EloRating {
            rating: opponent as f64,
        };

        let (expected, _) = skillratings::elo::expected_score(&player, &opponent);
        expected
    }

    fn k_factor(&self, rating: Rating) -> i32 {
        if rating < self.config.intermediate_threshold {
            self.config.provisional_k
        } else if rating < self.config.established_threshold {
            self.config.intermediate_k
        } else {
            self.config.established_k
        }
    }

    fn initial_rating(&self) -> Rating {
        self.config.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "initial_rating": self.config.initial_rating,
            "k_factors": [
                { "below": self.config.intermediate_threshold, "k": self.config.provisional_k },
                { "below": self.config.established_threshold, "k": self.config.intermediate_k },
                { "below": null, "k": self.config.established_k }
            ]
        })
    }
}
