//! Chess Ledger - player, competition and game registry with Elo ratings
//!
//! This crate tracks chess players and competitions, records games move by
//! move, and updates player ratings with a tiered K-factor Elo rule when a
//! game is finished.

pub mod competition;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod rating;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LedgerError, Result};
pub use types::*;

// Re-export key components
pub use competition::Competition;
pub use engine::{ActiveGame, GameReport, Ledger, SharedLedger};
pub use game::{GameSession, SessionState};
pub use rating::{EloRatingCalculator, RatingCalculator};
pub use storage::{DataStore, InMemoryStore, JsonFileStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
