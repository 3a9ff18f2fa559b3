//! Values the ledger hands back to its callers

use crate::types::{CompetitionId, GameId, GameResult, RatingChange};
use serde::{Deserialize, Serialize};

/// Outcome of finishing a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub game_id: GameId,
    pub competition_id: CompetitionId,
    pub result: GameResult,
    pub move_count: usize,
    /// White's rating change; `None` when either player was missing
    pub white: Option<RatingChange>,
    /// Black's rating change; `None` when either player was missing
    pub black: Option<RatingChange>,
    /// Whether the game was appended to its competition
    pub archived: bool,
}

impl GameReport {
    pub fn ratings_updated(&self) -> bool {
        self.white.is_some() && self.black.is_some()
    }
}

/// Statistics about the ledger contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub players: usize,
    pub competitions: usize,
    pub games_archived: usize,
    pub game_in_progress: bool,
}
