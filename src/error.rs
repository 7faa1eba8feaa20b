//! Error types for the match ledger
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

use crate::types::{MatchId, MatchMode, MatchStatus, PlayerId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific scoring and verification scenarios
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid score report: {reason}")]
    InvalidScore { reason: String },

    #[error("Player {voter} is not a required approver for match {match_id}")]
    NotRequiredApprover { match_id: MatchId, voter: PlayerId },

    #[error("Match {match_id} is already resolved as {status}")]
    AlreadyResolved {
        match_id: MatchId,
        status: MatchStatus,
    },

    #[error("The guest slot appears more than once in the rosters")]
    DuplicateGuestSlot,

    #[error("{mode} matches allow at most {allowed} guest slot(s)")]
    TooManyGuests { mode: MatchMode, allowed: usize },

    #[error("Player {player_id} appears more than once in the rosters")]
    DuplicatePlayer { player_id: PlayerId },

    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: MatchId },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage conflict: {reason}")]
    StorageConflict { reason: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
