//! Error types for the chess ledger
//!
//! Library operations return [`LedgerError`] so callers can branch on the
//! failure kind. The binary and the configuration loader use anyhow.

use crate::types::{CompetitionId, GameId, PlayerId};

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures surfaced by the ledger and its collaborators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Competition not found: {competition_id}")]
    CompetitionNotFound { competition_id: CompetitionId },

    #[error("No game is currently in progress")]
    NoActiveGame,

    #[error("Invalid move: {reason}")]
    InvalidMove { reason: String },

    #[error("Player {player_id} cannot play against themselves")]
    InvalidPairing { player_id: PlayerId },

    #[error("Game {game_id} already has a result")]
    GameAlreadyFinished { game_id: GameId },

    #[error("Game {game_id} has no result yet")]
    GameNotFinished { game_id: GameId },

    #[error("Persistence failure: {message}")]
    PersistenceFailure { message: String },

    #[error("No {kind} identifiers left after {last}")]
    IdSpaceExhausted { kind: &'static str, last: u32 },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::PersistenceFailure {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::PersistenceFailure {
            message: err.to_string(),
        }
    }
}
