//! Lifecycle engine for the chess ledger
//!
//! This module handles player and competition administration, registration,
//! and the start-record-finish lifecycle of a single game, including the
//! rating update applied when a game concludes.

pub mod ledger;
pub mod report;

// Re-export commonly used types
pub use ledger::{ActiveGame, Ledger, SharedLedger};
pub use report::{GameReport, LedgerStats};
