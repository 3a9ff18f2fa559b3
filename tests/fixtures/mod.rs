//! Test fixtures and store implementations for integration testing

use chess_ledger::competition::Competition;
use chess_ledger::engine::Ledger;
use chess_ledger::error::{LedgerError, Result};
use chess_ledger::storage::{DataStore, InMemoryStore};
use chess_ledger::types::{NewCompetition, NewPlayer, Player, PlayerId};
use std::sync::{Arc, Mutex};

/// Store whose every call fails, counting the attempted saves
#[derive(Debug, Default)]
pub struct FailingStore {
    save_attempts: Mutex<usize>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_attempts(&self) -> usize {
        self.save_attempts.lock().map(|n| *n).unwrap_or_default()
    }

    fn fail(&self) -> LedgerError {
        LedgerError::PersistenceFailure {
            message: "simulated I/O error".to_string(),
        }
    }

    fn record_attempt(&self) {
        if let Ok(mut attempts) = self.save_attempts.lock() {
            *attempts += 1;
        }
    }
}

impl DataStore for FailingStore {
    fn load_players(&self) -> Result<Vec<Player>> {
        Err(self.fail())
    }

    fn save_players(&self, _players: &[Player]) -> Result<()> {
        self.record_attempt();
        Err(self.fail())
    }

    fn load_competitions(&self) -> Result<Vec<Competition>> {
        Err(self.fail())
    }

    fn save_competitions(&self, _competitions: &[Competition]) -> Result<()> {
        self.record_attempt();
        Err(self.fail())
    }
}

/// A player with the given first name and rating
#[allow(dead_code)]
pub fn player(first_name: &str, rating: i32) -> NewPlayer {
    NewPlayer {
        first_name: first_name.to_string(),
        last_name: "Fixture".to_string(),
        elo_rating: Some(rating),
        ..NewPlayer::default()
    }
}

/// Ledger seeded with one competition and two registered players
pub struct TestClub {
    pub ledger: Ledger,
    pub store: Arc<InMemoryStore>,
    pub competition_id: u32,
    pub white: PlayerId,
    pub black: PlayerId,
}

#[allow(dead_code)]
pub fn create_test_club(white_rating: i32, black_rating: i32) -> TestClub {
    let store = Arc::new(InMemoryStore::new());
    let mut ledger = Ledger::new(store.clone());

    let competition_id = ledger
        .add_competition(NewCompetition {
            name: "Club Championship".to_string(),
            location: "Main hall".to_string(),
            ..NewCompetition::default()
        })
        .unwrap();
    let white = ledger.add_player(player("White", white_rating)).unwrap();
    let black = ledger.add_player(player("Black", black_rating)).unwrap();
    ledger.register_player(competition_id, white);
    ledger.register_player(competition_id, black);

    TestClub {
        ledger,
        store,
        competition_id,
        white,
        black,
    }
}
