//! Persistence gateway for players and competitions
//!
//! Every call reads or overwrites a whole collection; there are no
//! incremental updates. Implementations report failures as
//! [`LedgerError::PersistenceFailure`](crate::error::LedgerError) and the
//! ledger decides how to degrade.

pub mod json;
pub mod memory;

use crate::competition::Competition;
use crate::types::Player;

pub use json::JsonFileStore;
pub use memory::InMemoryStore;

/// Trait for loading and saving the ledger's collections
#[cfg_attr(test, mockall::automock)]
pub trait DataStore: Send + Sync {
    /// Load every player; empty if nothing has been saved yet
    fn load_players(&self) -> crate::error::Result<Vec<Player>>;

    /// Overwrite the stored players
    fn save_players(&self, players: &[Player]) -> crate::error::Result<()>;

    /// Load every competition; empty if nothing has been saved yet
    fn load_competitions(&self) -> crate::error::Result<Vec<Competition>>;

    /// Overwrite the stored competitions
    fn save_competitions(&self, competitions: &[Competition]) -> crate::error::Result<()>;
}
