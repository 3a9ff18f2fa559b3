//! Rating calculator trait
//!
//! This module defines the interface the ledger uses to turn a finished game
//! into rating updates. The arithmetic shared by every Elo-style system lives
//! in the provided methods; implementations only decide the expected score,
//! the K-factor and the starting rating.

use crate::types::{GameResult, Rating, Side};

/// Trait for calculating rating changes after games
pub trait RatingCalculator: Send + Sync {
    /// Probability-weighted score `player` is expected to take from `opponent`, in (0, 1)
    fn expected_score(&self, player: Rating, opponent: Rating) -> f64;

    /// Sensitivity multiplier applied to a player currently rated `rating`
    fn k_factor(&self, rating: Rating) -> i32;

    /// Rating assigned to players registered without one
    fn initial_rating(&self) -> Rating;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// New rating after scoring `observed_score` against `opponent`
    ///
    /// The change is rounded to the nearest integer with halves rounded away
    /// from zero, and the result is clamped at 0.
    fn new_rating(&self, current: Rating, opponent: Rating, observed_score: f64) -> Rating {
        let k = self.k_factor(current) as f64;
        let delta = k * (observed_score - self.expected_score(current, opponent));
        let updated = current as f64 + delta.round();
        updated.max(0.0) as Rating
    }

    /// New (white, black) ratings for a game between the two before-game ratings
    fn rate_game(
        &self,
        white_before: Rating,
        black_before: Rating,
        result: GameResult,
    ) -> (Rating, Rating) {
        let white = self.new_rating(
            white_before,
            black_before,
            result.score_for(Side::White),
        );
        let black = self.new_rating(
            black_before,
            white_before,
            result.score_for(Side::Black),
        );
        (white, black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat calculator: every game is a coin flip with k = 10
    struct FlatCalculator;

    impl RatingCalculator for FlatCalculator {
        fn expected_score(&self, _player: Rating, _opponent: Rating) -> f64 {
            0.5
        }

        fn k_factor(&self, _rating: Rating) -> i32 {
            10
        }

        fn initial_rating(&self) -> Rating {
            1000
        }

        fn config(&self) -> serde_json::Value {
            serde_json::json!({ "type": "flat" })
        }
    }

    #[test]
    fn test_provided_new_rating_rounds_half_away_from_zero() {
        let calculator = FlatCalculator;
        // 10 * (1 - 0.5) = 5, 10 * (0.5 - 0.5) = 0
        assert_eq!(calculator.new_rating(1000, 1000, 1.0), 1005);
        assert_eq!(calculator.new_rating(1000, 1000, 0.5), 1000);
        // 10 * (0.75 - 0.5) = 2.5 rounds to 3, -2.5 rounds to -3
        assert_eq!(calculator.new_rating(1000, 1000, 0.75), 1003);
        assert_eq!(calculator.new_rating(1000, 1000, 0.25), 997);
    }

    #[test]
    fn test_provided_new_rating_clamps_at_zero() {
        let calculator = FlatCalculator;
        assert_eq!(calculator.new_rating(3, 1000, 0.0), 0);
        assert_eq!(calculator.new_rating(0, 0, 0.0), 0);
    }

    #[test]
    fn test_rate_game_uses_both_sides() {
        let calculator = FlatCalculator;
        assert_eq!(
            calculator.rate_game(1000, 1200, GameResult::BlackWins),
            (995, 1205)
        );
        assert_eq!(
            calculator.rate_game(1000, 1200, GameResult::Draw),
            (1000, 1200)
        );
    }
}
