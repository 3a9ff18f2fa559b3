//! JSON file storage
//!
//! Players and competitions live in `players.json` and `competitions.json`
//! inside one data directory, each as a pretty-printed array.

use crate::competition::Competition;
use crate::error::Result;
use crate::storage::DataStore;
use crate::types::Player;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PLAYERS_FILE: &str = "players.json";
const COMPETITIONS_FILE: &str = "competitions.json";

/// File-backed store writing whole collections as JSON
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
            debug!("Created data directory {}", data_dir.display());
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(PLAYERS_FILE)
    }

    pub fn competitions_path(&self) -> PathBuf {
        self.data_dir.join(COMPETITIONS_FILE)
    }

    fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let items: Option<Vec<T>> = serde_json::from_str(&content)?;
        Ok(items.unwrap_or_default())
    }

    fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;
        fs::write(path, content)?;
        debug!("Wrote {} records to {}", items.len(), path.display());
        Ok(())
    }
}

impl DataStore for JsonFileStore {
    fn load_players(&self) -> Result<Vec<Player>> {
        Self::read_collection(&self.players_path())
    }

    fn save_players(&self, players: &[Player]) -> Result<()> {
        Self::write_collection(&self.players_path(), players)
    }

    fn load_competitions(&self) -> Result<Vec<Competition>> {
        Self::read_collection(&self.competitions_path())
    }

    fn save_competitions(&self, competitions: &[Competition]) -> Result<()> {
        Self::write_collection(&self.competitions_path(), competitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::types::NewCompetition;

    fn create_test_player(id: u32) -> Player {
        Player {
            id,
            first_name: "Magnus".to_string(),
            last_name: "Carlsen".to_string(),
            date_of_birth: None,
            email: String::new(),
            phone_number: String::new(),
            elo_rating: 2830,
        }
    }

    #[test]
    fn test_creates_data_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("Data");

        let store = JsonFileStore::new(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.data_dir(), dir.as_path());
    }

    #[test]
    fn test_missing_files_load_empty() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path()).unwrap();

        assert!(store.load_players().unwrap().is_empty());
        assert!(store.load_competitions().unwrap().is_empty());
    }

    #[test]
    fn test_players_persist() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path()).unwrap();

        let players = vec![create_test_player(1), create_test_player(3)];
        store.save_players(&players).unwrap();

        let reopened = JsonFileStore::new(temp.path()).unwrap();
        assert_eq!(reopened.load_players().unwrap(), players);
    }

    #[test]
    fn test_save_overwrites_whole_collection() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path()).unwrap();

        store
            .save_players(&[create_test_player(1), create_test_player(2)])
            .unwrap();
        store.save_players(&[create_test_player(5)]).unwrap();

        let loaded = store.load_players().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 5);
    }

    #[test]
    fn test_competitions_persist() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path()).unwrap();

        let mut competition = Competition::new(
            2,
            NewCompetition {
                name: "Club Championship".to_string(),
                ..NewCompetition::default()
            },
        );
        competition.register(1);

        store.save_competitions(&[competition.clone()]).unwrap();
        assert_eq!(store.load_competitions().unwrap(), vec![competition]);
    }

    #[test]
    fn test_null_document_loads_empty() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path()).unwrap();
        fs::write(store.players_path(), "null").unwrap();

        assert!(store.load_players().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_reports_persistence_failure() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path()).unwrap();
        fs::write(store.competitions_path(), "{ not json").unwrap();

        let err = store.load_competitions().unwrap_err();
        assert!(matches!(err, LedgerError::PersistenceFailure { .. }));
    }
}
