//! Game sessions
//!
//! A single game moves from open (recording moves) to finished (result set).

pub mod session;

pub use session::{GameSession, SessionState};
