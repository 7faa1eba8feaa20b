//! Rally Ledger - Match verification and rating core for informal competitive play
//!
//! This crate provides score validation under configurable scoring profiles,
//! multi-party verification of reported matches, and pluggable rating updates
//! (Elo, Glicko-2) applied exactly once per verified match.

pub mod config;
pub mod error;
pub mod notify;
pub mod player;
pub mod query;
pub mod rating;
pub mod score;
pub mod service;
pub mod store;
pub mod types;
pub mod utils;
pub mod verification;

// Re-export commonly used types and traits
pub use error::{LedgerError, Result};
pub use types::*;

// Re-export key components
pub use notify::Notifier;
pub use player::PlayerRegistry;
pub use verification::{VerificationEngine, VoteOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
