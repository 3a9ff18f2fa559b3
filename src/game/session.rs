//! Game session implementation and lifecycle management
//!
//! A session is created when a game starts, accepts moves while it is open,
//! and is sealed once a result is assigned. Ratings are not touched here; the
//! ledger applies them after completion so the state machine never needs
//! access to player storage.

use crate::error::{LedgerError, Result};
use crate::types::{CompetitionId, GameId, GameResult, Move, PlayerId, Rating};
use crate::utils::normalize_notation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Possible states of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Accepting moves, no result yet
    Open,
    /// Result assigned (terminal state)
    Finished,
}

/// One game between two players inside a competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    id: GameId,
    competition_id: CompetitionId,
    white_player_id: PlayerId,
    black_player_id: PlayerId,
    played_at: DateTime<Utc>,
    white_rating_before: Rating,
    black_rating_before: Rating,
    moves: Vec<Move>,
    result: Option<GameResult>,
}

impl GameSession {
    /// Create an open session with no moves
    pub fn new(
        id: GameId,
        competition_id: CompetitionId,
        white_player_id: PlayerId,
        black_player_id: PlayerId,
        white_rating_before: Rating,
        black_rating_before: Rating,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            competition_id,
            white_player_id,
            black_player_id,
            played_at,
            white_rating_before,
            black_rating_before,
            moves: Vec::new(),
            result: None,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn competition_id(&self) -> CompetitionId {
        self.competition_id
    }

    pub fn white_player_id(&self) -> PlayerId {
        self.white_player_id
    }

    pub fn black_player_id(&self) -> PlayerId {
        self.black_player_id
    }

    pub fn played_at(&self) -> DateTime<Utc> {
        self.played_at
    }

    pub fn white_rating_before(&self) -> Rating {
        self.white_rating_before
    }

    pub fn black_rating_before(&self) -> Rating {
        self.black_rating_before
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn state(&self) -> SessionState {
        match self.result {
            Some(_) => SessionState::Finished,
            None => SessionState::Open,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state() == SessionState::Finished
    }

    /// Append a move to an open session
    pub fn record_move(&mut self, notation: &str) -> Result<&Move> {
        if self.is_finished() {
            return Err(LedgerError::GameAlreadyFinished { game_id: self.id });
        }

        let notation = normalize_notation(notation).ok_or_else(|| LedgerError::InvalidMove {
            reason: "notation cannot be empty".to_string(),
        })?;

        self.moves.push(Move {
            position: self.moves.len() + 1,
            notation: notation.to_string(),
        });

        Ok(&self.moves[self.moves.len() - 1])
    }

    /// Seal the session with its result
    pub fn complete(&mut self, result: GameResult) -> Result<()> {
        if self.is_finished() {
            return Err(LedgerError::GameAlreadyFinished { game_id: self.id });
        }

        self.result = Some(result);
        Ok(())
    }

    /// (white score, black score), or `None` while the game is open
    pub fn scores(&self) -> Option<(f64, f64)> {
        self.result.map(GameResult::scores)
    }
}
