//! Ledger implementation orchestrating players, competitions and games
//!
//! The ledger owns the in-memory collections and the single open game. Every
//! mutating operation saves the affected collection through the configured
//! [`DataStore`]; save failures are logged and never undo the in-memory change.

use crate::competition::Competition;
use crate::engine::report::{GameReport, LedgerStats};
use crate::error::{LedgerError, Result};
use crate::game::GameSession;
use crate::rating::{EloRatingCalculator, RatingCalculator};
use crate::storage::DataStore;
use crate::types::{
    CompetitionId, GameId, GameResult, Move, NewCompetition, NewPlayer, Player, PlayerId,
    PlayerProfile, Rating, RatingChange, Side,
};
use crate::utils::{current_timestamp, next_id};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Ledger shared between callers; the whole engine sits behind one lock
pub type SharedLedger = Arc<Mutex<Ledger>>;

/// The game currently being recorded, if any
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ActiveGame {
    #[default]
    NoGame,
    Open(GameSession),
}

impl ActiveGame {
    pub fn session(&self) -> Option<&GameSession> {
        match self {
            ActiveGame::NoGame => None,
            ActiveGame::Open(session) => Some(session),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ActiveGame::Open(_))
    }
}

/// The main ledger
pub struct Ledger {
    /// Players by ID
    players: BTreeMap<PlayerId, Player>,
    /// Competitions by ID, each holding its finished games
    competitions: BTreeMap<CompetitionId, Competition>,
    /// Game being recorded
    active_game: ActiveGame,
    /// Persistence gateway
    store: Arc<dyn DataStore>,
    /// Rating calculator applied when a game finishes
    rating_calculator: Arc<dyn RatingCalculator>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("players", &self.players.len())
            .field("competitions", &self.competitions.len())
            .field("active_game", &self.active_game)
            .finish()
    }
}

/// Next free identifier, or `IdSpaceExhausted` once `u32::MAX` is taken
fn allocate_id<I>(kind: &'static str, ids: I) -> Result<u32>
where
    I: IntoIterator<Item = u32>,
{
    next_id(ids).ok_or(LedgerError::IdSpaceExhausted {
        kind,
        last: u32::MAX,
    })
}

impl Ledger {
    /// Create a ledger with the default Elo calculator and load the store
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self::with_calculator(store, Arc::new(EloRatingCalculator::default()))
    }

    /// Create a ledger with a custom rating calculator and load the store
    pub fn with_calculator(
        store: Arc<dyn DataStore>,
        rating_calculator: Arc<dyn RatingCalculator>,
    ) -> Self {
        let mut ledger = Self {
            players: BTreeMap::new(),
            competitions: BTreeMap::new(),
            active_game: ActiveGame::NoGame,
            store,
            rating_calculator,
        };
        ledger.reload();
        ledger
    }

    /// Wrap the ledger for use from several callers
    pub fn into_shared(self) -> SharedLedger {
        Arc::new(Mutex::new(self))
    }

    /// Replace both collections with what the store currently holds
    ///
    /// A failed load leaves the corresponding collection empty. The open game
    /// is kept.
    pub fn reload(&mut self) {
        let players = self.store.load_players().unwrap_or_else(|e| {
            warn!("Failed to load players, starting empty: {}", e);
            Vec::new()
        });
        let competitions = self.store.load_competitions().unwrap_or_else(|e| {
            warn!("Failed to load competitions, starting empty: {}", e);
            Vec::new()
        });

        self.players = players.into_iter().map(|p| (p.id, p)).collect();
        self.competitions = competitions.into_iter().map(|c| (c.id, c)).collect();

        info!(
            "Loaded {} players and {} competitions",
            self.players.len(),
            self.competitions.len()
        );
    }

    fn persist_players(&self) {
        let players: Vec<Player> = self.players.values().cloned().collect();
        if let Err(e) = self.store.save_players(&players) {
            warn!("Failed to save {} players: {}", players.len(), e);
        }
    }

    fn persist_competitions(&self) {
        let competitions: Vec<Competition> = self.competitions.values().cloned().collect();
        if let Err(e) = self.store.save_competitions(&competitions) {
            warn!("Failed to save {} competitions: {}", competitions.len(), e);
        }
    }

    // ---------------------------------------------------------------------
    // Players
    // ---------------------------------------------------------------------

    /// Register a new player and return its assigned ID
    pub fn add_player(&mut self, new_player: NewPlayer) -> Result<PlayerId> {
        let id = allocate_id("player", self.players.keys().copied())?;
        let elo_rating = new_player
            .elo_rating
            .unwrap_or_else(|| self.rating_calculator.initial_rating())
            .max(0);

        let player = Player {
            id,
            first_name: new_player.first_name,
            last_name: new_player.last_name,
            date_of_birth: new_player.date_of_birth,
            email: new_player.email,
            phone_number: new_player.phone_number,
            elo_rating,
        };

        info!("Added player {} '{}' rated {}", id, player.full_name(), elo_rating);
        self.players.insert(id, player);
        self.persist_players();
        Ok(id)
    }

    /// Overwrite a player's profile, including the rating
    pub fn update_player(&mut self, player_id: PlayerId, profile: PlayerProfile) -> Result<()> {
        let player = self
            .players
            .get_mut(&player_id)
            .ok_or(LedgerError::PlayerNotFound { player_id })?;

        player.first_name = profile.first_name;
        player.last_name = profile.last_name;
        player.date_of_birth = profile.date_of_birth;
        player.email = profile.email;
        player.phone_number = profile.phone_number;
        player.elo_rating = profile.elo_rating.max(0);

        debug!("Updated profile of player {}", player_id);
        self.persist_players();
        Ok(())
    }

    /// Override a player's rating outside of a game
    pub fn set_player_rating(&mut self, player_id: PlayerId, rating: Rating) -> Result<()> {
        let player = self
            .players
            .get_mut(&player_id)
            .ok_or(LedgerError::PlayerNotFound { player_id })?;

        let old_rating = player.elo_rating;
        player.elo_rating = rating.max(0);

        info!(
            "Rating of player {} set from {} to {}",
            player_id, old_rating, player.elo_rating
        );
        self.persist_players();
        Ok(())
    }

    /// Remove a player; false if the ID is unknown
    ///
    /// Rosters and archived games keep referring to the removed ID.
    pub fn delete_player(&mut self, player_id: PlayerId) -> bool {
        if self.players.remove(&player_id).is_none() {
            return false;
        }

        info!("Deleted player {}", player_id);
        self.persist_players();
        true
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.get(&player_id)
    }

    /// All players ordered by ID
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Players ordered by rating, highest first; ties by ID
    pub fn leaderboard(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.values().collect();
        ranked.sort_by(|a, b| b.elo_rating.cmp(&a.elo_rating).then(a.id.cmp(&b.id)));
        ranked
    }

    // ---------------------------------------------------------------------
    // Competitions
    // ---------------------------------------------------------------------

    /// Create a competition and return its assigned ID
    pub fn add_competition(&mut self, details: NewCompetition) -> Result<CompetitionId> {
        let id = allocate_id("competition", self.competitions.keys().copied())?;
        let competition = Competition::new(id, details);

        info!("Added competition {} '{}'", id, competition.name);
        self.competitions.insert(id, competition);
        self.persist_competitions();
        Ok(id)
    }

    /// Overwrite a competition's name, location and dates
    ///
    /// The roster and archived games are untouched.
    pub fn update_competition(
        &mut self,
        competition_id: CompetitionId,
        details: NewCompetition,
    ) -> Result<()> {
        let competition = self
            .competitions
            .get_mut(&competition_id)
            .ok_or(LedgerError::CompetitionNotFound { competition_id })?;

        competition.name = details.name;
        competition.location = details.location;
        competition.start_date = details.start_date;
        competition.end_date = details.end_date;

        debug!("Updated details of competition {}", competition_id);
        self.persist_competitions();
        Ok(())
    }

    /// Add a player to a competition's roster
    ///
    /// False if the competition does not exist or the player is already
    /// registered. The player ID itself is not checked.
    pub fn register_player(&mut self, competition_id: CompetitionId, player_id: PlayerId) -> bool {
        let Some(competition) = self.competitions.get_mut(&competition_id) else {
            debug!(
                "Cannot register player {}: competition {} not found",
                player_id, competition_id
            );
            return false;
        };

        if !competition.register(player_id) {
            debug!(
                "Player {} already registered in competition {}",
                player_id, competition_id
            );
            return false;
        }

        info!(
            "Registered player {} in competition {}",
            player_id, competition_id
        );
        self.persist_competitions();
        true
    }

    /// Remove a player from a competition's roster
    pub fn unregister_player(
        &mut self,
        competition_id: CompetitionId,
        player_id: PlayerId,
    ) -> bool {
        let removed = self
            .competitions
            .get_mut(&competition_id)
            .map(|competition| competition.unregister(player_id))
            .unwrap_or(false);

        if removed {
            info!(
                "Unregistered player {} from competition {}",
                player_id, competition_id
            );
            self.persist_competitions();
        }
        removed
    }

    pub fn competition(&self, competition_id: CompetitionId) -> Option<&Competition> {
        self.competitions.get(&competition_id)
    }

    /// All competitions ordered by ID
    pub fn competitions(&self) -> impl Iterator<Item = &Competition> {
        self.competitions.values()
    }

    // ---------------------------------------------------------------------
    // Games
    // ---------------------------------------------------------------------

    /// ID the next started game will receive; shared across all competitions
    pub fn next_game_id(&self) -> Result<GameId> {
        allocate_id(
            "game",
            self.competitions
                .values()
                .flat_map(|competition| competition.games().iter().map(GameSession::id)),
        )
    }

    /// Start recording a new game
    ///
    /// Both players' current ratings become the game's before-game ratings. An
    /// unfinished game that is still open is discarded.
    pub fn start_game(
        &mut self,
        competition_id: CompetitionId,
        white_player_id: PlayerId,
        black_player_id: PlayerId,
    ) -> Result<GameId> {
        let white_rating = self
            .players
            .get(&white_player_id)
            .map(|p| p.elo_rating)
            .ok_or(LedgerError::PlayerNotFound {
                player_id: white_player_id,
            })?;
        let black_rating = self
            .players
            .get(&black_player_id)
            .map(|p| p.elo_rating)
            .ok_or(LedgerError::PlayerNotFound {
                player_id: black_player_id,
            })?;

        if white_player_id == black_player_id {
            return Err(LedgerError::InvalidPairing {
                player_id: white_player_id,
            });
        }

        let game_id = self.next_game_id()?;
        let session = GameSession::new(
            game_id,
            competition_id,
            white_player_id,
            black_player_id,
            white_rating,
            black_rating,
            current_timestamp(),
        );

        if let ActiveGame::Open(previous) =
            std::mem::replace(&mut self.active_game, ActiveGame::Open(session))
        {
            warn!(
                "Discarding unfinished game {} after {} moves",
                previous.id(),
                previous.move_count()
            );
        }

        info!(
            "Started game {} in competition {}: {} ({}) vs {} ({})",
            game_id, competition_id, white_player_id, white_rating, black_player_id, black_rating
        );
        Ok(game_id)
    }

    /// Record the next move of the open game
    pub fn add_move(&mut self, notation: &str) -> Result<Move> {
        let ActiveGame::Open(session) = &mut self.active_game else {
            return Err(LedgerError::NoActiveGame);
        };

        let recorded = session.record_move(notation)?.clone();
        debug!(
            "Game {} move {}: {}",
            session.id(),
            recorded.position,
            recorded.notation
        );
        Ok(recorded)
    }

    /// Seal the open game, apply rating changes, archive it and save
    ///
    /// Ratings are only updated when both players still exist, and the game is
    /// only archived when its competition exists. The open game is cleared in
    /// every case.
    pub fn finish_game(&mut self, result: GameResult) -> Result<GameReport> {
        let mut session = match std::mem::take(&mut self.active_game) {
            ActiveGame::Open(session) => session,
            ActiveGame::NoGame => return Err(LedgerError::NoActiveGame),
        };

        if let Err(e) = session.complete(result) {
            self.active_game = ActiveGame::Open(session);
            return Err(e);
        }

        let rating_changes = self.apply_rating_changes(&session, result);

        let game_id = session.id();
        let competition_id = session.competition_id();
        let move_count = session.move_count();

        let archived = match self.competitions.get_mut(&competition_id) {
            Some(competition) => match competition.archive_game(session) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Failed to archive game {}: {}", game_id, e);
                    false
                }
            },
            None => {
                warn!(
                    "Competition {} not found, game {} was not archived",
                    competition_id, game_id
                );
                false
            }
        };

        self.persist_players();
        self.persist_competitions();

        info!(
            "Finished game {} ({}) after {} moves",
            game_id, result, move_count
        );

        let (white, black) = match rating_changes {
            Some((white, black)) => (Some(white), Some(black)),
            None => (None, None),
        };

        Ok(GameReport {
            game_id,
            competition_id,
            result,
            move_count,
            white,
            black,
            archived,
        })
    }

    fn apply_rating_changes(
        &mut self,
        session: &GameSession,
        result: GameResult,
    ) -> Option<(RatingChange, RatingChange)> {
        let white_id = session.white_player_id();
        let black_id = session.black_player_id();

        if !self.players.contains_key(&white_id) || !self.players.contains_key(&black_id) {
            warn!(
                "Game {}: player {} or {} no longer exists, ratings unchanged",
                session.id(),
                white_id,
                black_id
            );
            return None;
        }

        let (new_white, new_black) = self.rating_calculator.rate_game(
            session.white_rating_before(),
            session.black_rating_before(),
            result,
        );

        let white = self.overwrite_rating(white_id, Side::White, new_white)?;
        let black = self.overwrite_rating(black_id, Side::Black, new_black)?;

        info!(
            "Ratings after game {}: {} {} -> {}, {} {} -> {}",
            session.id(),
            white_id,
            white.old_rating,
            white.new_rating,
            black_id,
            black.old_rating,
            black.new_rating
        );
        Some((white, black))
    }

    fn overwrite_rating(
        &mut self,
        player_id: PlayerId,
        side: Side,
        new_rating: Rating,
    ) -> Option<RatingChange> {
        let player = self.players.get_mut(&player_id)?;
        let old_rating = player.elo_rating;
        player.elo_rating = new_rating;

        Some(RatingChange {
            player_id,
            side,
            old_rating,
            new_rating,
        })
    }

    /// Drop the open game without archiving or saving anything
    pub fn cancel_game(&mut self) -> Option<GameSession> {
        match std::mem::take(&mut self.active_game) {
            ActiveGame::Open(session) => {
                info!(
                    "Cancelled game {} after {} moves",
                    session.id(),
                    session.move_count()
                );
                Some(session)
            }
            ActiveGame::NoGame => None,
        }
    }

    /// The game being recorded, if any
    pub fn current_game(&self) -> Option<&GameSession> {
        self.active_game.session()
    }

    pub fn active_game(&self) -> &ActiveGame {
        &self.active_game
    }

    /// Get ledger statistics
    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            players: self.players.len(),
            competitions: self.competitions.len(),
            games_archived: self
                .competitions
                .values()
                .map(|competition| competition.games().len())
                .sum(),
            game_in_progress: self.active_game.is_open(),
        }
    }
}
