//! Rating system using the Elo update rule
//!
//! This module provides the rating calculator interface and the tiered
//! K-factor Elo implementation built on the skillratings crate.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::EloRatingCalculator;
