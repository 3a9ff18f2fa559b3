//! Competition roster and game archive
//!
//! The registry only tracks membership; whether a player id exists in the
//! player collection is the caller's concern.

use crate::error::{LedgerError, Result};
use crate::game::GameSession;
use crate::types::{CompetitionId, NewCompetition, PlayerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A competition with its registered players and finished games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    registered_players: BTreeSet<PlayerId>,
    #[serde(default)]
    games: Vec<GameSession>,
}

impl Competition {
    /// Create an empty competition
    pub fn new(id: CompetitionId, details: NewCompetition) -> Self {
        Self {
            id,
            name: details.name,
            location: details.location,
            start_date: details.start_date,
            end_date: details.end_date,
            registered_players: BTreeSet::new(),
            games: Vec::new(),
        }
    }

    /// Add a player to the roster; false if already registered
    pub fn register(&mut self, player_id: PlayerId) -> bool {
        self.registered_players.insert(player_id)
    }

    /// Remove a player from the roster; false if not registered
    pub fn unregister(&mut self, player_id: PlayerId) -> bool {
        self.registered_players.remove(&player_id)
    }

    pub fn is_registered(&self, player_id: PlayerId) -> bool {
        self.registered_players.contains(&player_id)
    }

    /// Registered player ids in ascending order
    pub fn roster(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.registered_players.iter().copied()
    }

    pub fn roster_size(&self) -> usize {
        self.registered_players.len()
    }

    /// Finished games in archival order
    pub fn games(&self) -> &[GameSession] {
        &self.games
    }

    /// Append a finished game
    ///
    /// Archiving the same game twice is not detected.
    pub fn archive_game(&mut self, session: GameSession) -> Result<()> {
        if !session.is_finished() {
            return Err(LedgerError::GameNotFinished {
                game_id: session.id(),
            });
        }

        self.games.push(session);
        Ok(())
    }
}
