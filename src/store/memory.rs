//! In-memory storage implementations
//!
//! Reference implementations of the storage traits backed by locked maps,
//! suitable for tests, the demo binary, and single-process deployments.

use crate::error::{LedgerError, Result};
use crate::store::{MatchStore, PlayerStore, SnapshotStore};
use crate::types::{Match, MatchId, Player, PlayerId, RatingSnapshot};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

fn lock_error(what: &str) -> anyhow::Error {
    LedgerError::InternalError {
        message: format!("Failed to acquire {} lock", what),
    }
    .into()
}

/// In-memory player store
#[derive(Debug, Default)]
pub struct MemoryPlayerStore {
    players: RwLock<HashMap<PlayerId, Player>>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for MemoryPlayerStore {
    fn get(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        let players = self.players.read().map_err(|_| lock_error("players"))?;
        Ok(players.get(player_id).cloned())
    }

    fn put(&self, player: Player) -> Result<()> {
        let mut players = self.players.write().map_err(|_| lock_error("players"))?;
        players.insert(player.id.clone(), player);
        Ok(())
    }

    fn all(&self) -> Result<Vec<Player>> {
        let players = self.players.read().map_err(|_| lock_error("players"))?;
        Ok(players.values().cloned().collect())
    }

    fn count(&self) -> Result<usize> {
        let players = self.players.read().map_err(|_| lock_error("players"))?;
        Ok(players.len())
    }
}

/// In-memory match store with monotonic id issuance
#[derive(Debug, Default)]
pub struct MemoryMatchStore {
    matches: RwLock<HashMap<MatchId, Match>>,
    next_id: AtomicU64,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryMatchStore {
    fn next_id(&self) -> Result<MatchId> {
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn get(&self, match_id: MatchId) -> Result<Option<Match>> {
        let matches = self.matches.read().map_err(|_| lock_error("matches"))?;
        Ok(matches.get(&match_id).cloned())
    }

    fn put(&self, record: Match) -> Result<()> {
        let mut matches = self.matches.write().map_err(|_| lock_error("matches"))?;
        matches.insert(record.id, record);
        Ok(())
    }

    fn for_player(&self, player_id: &PlayerId) -> Result<Vec<Match>> {
        let matches = self.matches.read().map_err(|_| lock_error("matches"))?;
        let mut found: Vec<Match> = matches
            .values()
            .filter(|m| m.participants().any(|p| p == player_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found)
    }

    fn pending(&self) -> Result<Vec<Match>> {
        let matches = self.matches.read().map_err(|_| lock_error("matches"))?;
        let mut found: Vec<Match> = matches
            .values()
            .filter(|m| !m.status.is_terminal())
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found)
    }
}

/// In-memory append-only snapshot store
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: RwLock<Vec<RatingSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn append(&self, snapshot: RatingSnapshot) -> Result<()> {
        let mut snapshots = self.snapshots.write().map_err(|_| lock_error("snapshots"))?;
        snapshots.push(snapshot);
        Ok(())
    }

    fn for_player(&self, player_id: &PlayerId) -> Result<Vec<RatingSnapshot>> {
        let snapshots = self.snapshots.read().map_err(|_| lock_error("snapshots"))?;
        Ok(snapshots
            .iter()
            .filter(|s| &s.player_id == player_id)
            .cloned()
            .collect())
    }

    fn for_match(&self, match_id: MatchId) -> Result<Vec<RatingSnapshot>> {
        let snapshots = self.snapshots.read().map_err(|_| lock_error("snapshots"))?;
        Ok(snapshots
            .iter()
            .filter(|s| s.match_id == match_id)
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize> {
        let snapshots = self.snapshots.read().map_err(|_| lock_error("snapshots"))?;
        Ok(snapshots.len())
    }
}
