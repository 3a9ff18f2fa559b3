//! In-memory storage
//!
//! Keeps the last saved collections behind locks and counts save calls, which
//! makes it useful for tests and for dry runs of the CLI.

use crate::competition::Competition;
use crate::error::{LedgerError, Result};
use crate::storage::DataStore;
use crate::types::Player;
use std::sync::RwLock;

/// In-memory store implementation
#[derive(Debug, Default)]
pub struct InMemoryStore {
    players: RwLock<Vec<Player>>,
    competitions: RwLock<Vec<Competition>>,
    player_saves: RwLock<usize>,
    competition_saves: RwLock<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds the given collections
    pub fn with_data(players: Vec<Player>, competitions: Vec<Competition>) -> Self {
        Self {
            players: RwLock::new(players),
            competitions: RwLock::new(competitions),
            ..Self::default()
        }
    }

    /// Number of times `save_players` has been called
    pub fn player_save_count(&self) -> usize {
        self.player_saves.read().map(|count| *count).unwrap_or_default()
    }

    /// Number of times `save_competitions` has been called
    pub fn competition_save_count(&self) -> usize {
        self.competition_saves
            .read()
            .map(|count| *count)
            .unwrap_or_default()
    }

    /// Snapshot of the last saved players
    pub fn saved_players(&self) -> Vec<Player> {
        self.players
            .read()
            .map(|players| players.clone())
            .unwrap_or_default()
    }

    /// Snapshot of the last saved competitions
    pub fn saved_competitions(&self) -> Vec<Competition> {
        self.competitions
            .read()
            .map(|competitions| competitions.clone())
            .unwrap_or_default()
    }

    fn lock_error(what: &str) -> LedgerError {
        LedgerError::PersistenceFailure {
            message: format!("Failed to acquire {} lock", what),
        }
    }
}

impl DataStore for InMemoryStore {
    fn load_players(&self) -> Result<Vec<Player>> {
        let players = self
            .players
            .read()
            .map_err(|_| Self::lock_error("players read"))?;

        Ok(players.clone())
    }

    fn save_players(&self, players: &[Player]) -> Result<()> {
        let mut stored = self
            .players
            .write()
            .map_err(|_| Self::lock_error("players write"))?;
        *stored = players.to_vec();
        drop(stored);

        if let Ok(mut count) = self.player_saves.write() {
            *count += 1;
        }
        Ok(())
    }

    fn load_competitions(&self) -> Result<Vec<Competition>> {
        let competitions = self
            .competitions
            .read()
            .map_err(|_| Self::lock_error("competitions read"))?;

        Ok(competitions.clone())
    }

    fn save_competitions(&self, competitions: &[Competition]) -> Result<()> {
        let mut stored = self
            .competitions
            .write()
            .map_err(|_| Self::lock_error("competitions write"))?;
        *stored = competitions.to_vec();
        drop(stored);

        if let Ok(mut count) = self.competition_saves.write() {
            *count += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewCompetition;

    #[test]
    fn test_empty_store() {
        let store = InMemoryStore::new();
        assert!(store.load_players().unwrap().is_empty());
        assert!(store.load_competitions().unwrap().is_empty());
        assert_eq!(store.player_save_count(), 0);
        assert_eq!(store.competition_save_count(), 0);
    }

    #[test]
    fn test_save_replaces_and_counts() {
        let store = InMemoryStore::new();
        let competition = Competition::new(1, NewCompetition::default());

        store.save_competitions(&[competition.clone()]).unwrap();
        store.save_competitions(&[]).unwrap();

        assert!(store.load_competitions().unwrap().is_empty());
        assert_eq!(store.competition_save_count(), 2);
        assert_eq!(store.player_save_count(), 0);
    }

    #[test]
    fn test_with_data() {
        let competition = Competition::new(4, NewCompetition::default());
        let store = InMemoryStore::with_data(Vec::new(), vec![competition]);

        let loaded = store.load_competitions().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 4);
    }
}
