//! Common types used throughout the ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = u32;

/// Unique identifier for competitions
pub type CompetitionId = u32;

/// Unique identifier for games, shared across all competitions
pub type GameId = u32;

/// Elo rating; never negative once it has gone through the calculator
pub type Rating = i32;

/// A registered chess player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    pub phone_number: String,
    pub elo_rating: Rating,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Player data supplied by the caller before an id is assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    pub phone_number: String,
    /// Starting rating; the calculator's initial rating is used when absent
    pub elo_rating: Option<Rating>,
}

/// Editable profile of an existing player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    pub phone_number: String,
    pub elo_rating: Rating,
}

impl From<&Player> for PlayerProfile {
    fn from(player: &Player) -> Self {
        Self {
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            date_of_birth: player.date_of_birth,
            email: player.email.clone(),
            phone_number: player.phone_number.clone(),
            elo_rating: player.elo_rating,
        }
    }
}

/// Competition data supplied by the caller before an id is assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCompetition {
    pub name: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    /// (white score, black score)
    pub fn scores(self) -> (f64, f64) {
        match self {
            GameResult::WhiteWins => (1.0, 0.0),
            GameResult::BlackWins => (0.0, 1.0),
            GameResult::Draw => (0.5, 0.5),
        }
    }

    /// Score obtained by one side
    pub fn score_for(self, side: Side) -> f64 {
        let (white, black) = self.scores();
        match side {
            Side::White => white,
            Side::Black => black,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "1-0"),
            GameResult::BlackWins => write!(f, "0-1"),
            GameResult::Draw => write!(f, "1/2-1/2"),
        }
    }
}

/// A single recorded move; position is 1-based and never reordered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub notation: String,
}

/// Rating change applied to one player when a game finishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub side: Side,
    pub old_rating: Rating,
    pub new_rating: Rating,
}

impl RatingChange {
    pub fn delta(&self) -> Rating {
        self.new_rating - self.old_rating
    }
}
