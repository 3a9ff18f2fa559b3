//! Competitions: player rosters and archives of finished games

pub mod registry;

pub use registry::Competition;
