//! Persistence seam for players, matches, and rating snapshots
//!
//! This module defines the storage interfaces the core depends on, with
//! in-memory reference implementations. Only the logical record shapes are
//! mandated; a database-backed implementation supplies the same traits.

pub mod memory;

use crate::error::Result;
use crate::types::{Match, MatchId, Player, PlayerId, RatingSnapshot};

// Re-export commonly used types
pub use memory::{MemoryMatchStore, MemoryPlayerStore, MemorySnapshotStore};

/// Trait for player record storage
pub trait PlayerStore: Send + Sync {
    /// Get a player record
    fn get(&self, player_id: &PlayerId) -> Result<Option<Player>>;

    /// Store or replace a player record
    fn put(&self, player: Player) -> Result<()>;

    /// All player records (for leaderboards and admin tooling)
    fn all(&self) -> Result<Vec<Player>>;

    /// Total number of registered players
    fn count(&self) -> Result<usize>;
}

/// Trait for match record storage
///
/// Implementations issue monotonically increasing match ids.
pub trait MatchStore: Send + Sync {
    /// Issue the next match id
    fn next_id(&self) -> Result<MatchId>;

    /// Get a match record
    fn get(&self, match_id: MatchId) -> Result<Option<Match>>;

    /// Store or replace a match record
    fn put(&self, record: Match) -> Result<()>;

    /// Matches a player participated in, most recent first
    fn for_player(&self, player_id: &PlayerId) -> Result<Vec<Match>>;

    /// All currently pending matches, most recent first
    fn pending(&self) -> Result<Vec<Match>>;
}

/// Trait for append-only rating snapshot storage
pub trait SnapshotStore: Send + Sync {
    /// Append a snapshot; snapshots are never mutated or removed
    fn append(&self, snapshot: RatingSnapshot) -> Result<()>;

    /// Snapshots for a player, in append order
    fn for_player(&self, player_id: &PlayerId) -> Result<Vec<RatingSnapshot>>;

    /// Snapshots for a match, in append order
    fn for_match(&self, match_id: MatchId) -> Result<Vec<RatingSnapshot>>;

    /// Total number of snapshots
    fn count(&self) -> Result<usize>;
}
