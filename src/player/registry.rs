//! Player registry implementation
//!
//! The registry is the only cross-match shared mutable resource. Doubles
//! partners may appear in several simultaneously pending matches, so a
//! player's rating read-modify-write is serialized per player, not per
//! match: the registry keeps a lock per player and acquires the locks of all
//! of a match's participants in sorted id order before applying a rating
//! strategy, covering the whole apply-and-persist step.

use crate::config::rating::RatingSettings;
use crate::error::{LedgerError, Result};
use crate::rating::strategy::{RatedPlayer, RatingStrategy};
use crate::store::{PlayerStore, SnapshotStore};
use crate::types::{Match, Player, PlayerId, PlayerKind, RatingSnapshot};
use crate::utils::{current_timestamp, generate_snapshot_id};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Well-known id of the guest singleton
///
/// The guest has a fixed configured rating, is never mutated by any rating
/// strategy, and is never lazily created as a human.
pub const GUEST_ID: &str = "guest";

/// Registry of players backed by a player store
pub struct PlayerRegistry {
    store: Arc<dyn PlayerStore>,
    snapshots: Arc<dyn SnapshotStore>,
    settings: RatingSettings,
    locks: Mutex<HashMap<PlayerId, Arc<Mutex<()>>>>,
}

impl PlayerRegistry {
    /// Create a registry and seed the guest singleton if absent
    pub fn new(
        store: Arc<dyn PlayerStore>,
        snapshots: Arc<dyn SnapshotStore>,
        settings: RatingSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let registry = Self {
            store,
            snapshots,
            settings,
            locks: Mutex::new(HashMap::new()),
        };
        registry.seed_guest()?;
        Ok(registry)
    }

    fn seed_guest(&self) -> Result<()> {
        let guest_id = GUEST_ID.to_string();
        if self.store.get(&guest_id)?.is_none() {
            let guest = Player::new(guest_id, PlayerKind::Guest, self.settings.guest_rating());
            self.store.put(guest)?;
            debug!("Seeded guest singleton at rating {}", self.settings.guest_rating);
        }
        Ok(())
    }

    /// Whether an id names the guest singleton
    pub fn is_guest(player_id: &str) -> bool {
        player_id == GUEST_ID
    }

    /// Get a player, lazily creating a human record with the default rating
    /// on first interaction
    pub fn get_or_create(&self, player_id: &PlayerId) -> Result<Player> {
        if let Some(player) = self.store.get(player_id)? {
            return Ok(player);
        }
        if Self::is_guest(player_id) {
            // The singleton is seeded at construction; recreate defensively
            self.seed_guest()?;
            return self.store.get(player_id)?.ok_or_else(|| {
                LedgerError::InternalError {
                    message: "Guest singleton missing after seeding".to_string(),
                }
                .into()
            });
        }

        let player = Player::new(
            player_id.clone(),
            PlayerKind::Human,
            self.settings.initial_rating(),
        );
        self.store.put(player.clone())?;
        debug!("Created player {} at rating {}", player_id, player.rating.rating);
        Ok(player)
    }

    /// Record a player's terms acceptance with an optional signed name
    pub fn record_terms_acceptance(
        &self,
        player_id: &PlayerId,
        signed_name: Option<String>,
    ) -> Result<()> {
        let mut player = self.get_or_create(player_id)?;
        player.accepted_terms = true;
        if signed_name.is_some() {
            player.signed_name = signed_name;
        }
        player.updated_at = current_timestamp();
        self.store.put(player)?;
        Ok(())
    }

    fn lock_for(&self, player_id: &PlayerId) -> Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| LedgerError::InternalError {
            message: "Failed to acquire player lock table".to_string(),
        })?;
        Ok(locks
            .entry(player_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    fn rated_player(&self, player_id: &PlayerId) -> Result<RatedPlayer> {
        let player = self.get_or_create(player_id)?;
        Ok(RatedPlayer {
            id: player.id,
            kind: player.kind,
            rating: player.rating,
        })
    }

    /// Apply a rating strategy to a verified match exactly once
    ///
    /// Locks every participant in sorted id order for the whole
    /// read-apply-persist sequence, mutates human players, and appends one
    /// snapshot per human while the locks are held so each player's audit
    /// trail stays in application order. Guests are read for team
    /// expectation but never written.
    pub fn apply_verified_outcome(
        &self,
        record: &Match,
        strategy: &dyn RatingStrategy,
    ) -> Result<Vec<RatingSnapshot>> {
        let mut ids: Vec<PlayerId> = record.participants().cloned().collect();
        ids.sort();
        ids.dedup();

        // Stable acquisition order prevents deadlock across matches sharing players
        let handles: Vec<Arc<Mutex<()>>> = ids
            .iter()
            .map(|id| self.lock_for(id))
            .collect::<Result<_>>()?;
        let _guards: Vec<_> = handles
            .iter()
            .map(|handle| {
                handle.lock().map_err(|_| LedgerError::InternalError {
                    message: "Failed to acquire player lock".to_string(),
                })
            })
            .collect::<std::result::Result<_, _>>()?;

        let team_a: Vec<RatedPlayer> = record
            .team_a
            .iter()
            .map(|id| self.rated_player(id))
            .collect::<Result<_>>()?;
        let team_b: Vec<RatedPlayer> = record
            .team_b
            .iter()
            .map(|id| self.rated_player(id))
            .collect::<Result<_>>()?;

        let updates = strategy.apply(&team_a, &team_b, record.winner)?;

        let now = current_timestamp();
        let mut snapshots = Vec::with_capacity(updates.len());
        for update in updates {
            let mut player =
                self.store
                    .get(&update.player_id)?
                    .ok_or_else(|| LedgerError::InternalError {
                        message: format!("Player {} vanished during rating", update.player_id),
                    })?;
            if player.kind == PlayerKind::Guest {
                continue;
            }
            player.record_result(update.after, record.is_winner(&update.player_id));
            self.store.put(player)?;

            let snapshot = RatingSnapshot {
                id: generate_snapshot_id(),
                match_id: record.id,
                player_id: update.player_id,
                strategy: strategy.kind(),
                before: update.before,
                after: update.after,
                recorded_at: now,
            };
            self.snapshots.append(snapshot.clone())?;
            snapshots.push(snapshot);
        }

        debug!(
            "Applied {} ratings for match #{} ({} snapshots)",
            strategy.kind(),
            record.id,
            snapshots.len()
        );
        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryPlayerStore, MemorySnapshotStore};

    fn registry() -> PlayerRegistry {
        PlayerRegistry::new(
            Arc::new(MemoryPlayerStore::new()),
            Arc::new(MemorySnapshotStore::new()),
            RatingSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_guest_is_seeded_at_construction() {
        let registry = registry();
        let guest = registry.get_or_create(&GUEST_ID.to_string()).unwrap();
        assert_eq!(guest.kind, PlayerKind::Guest);
        assert_eq!(guest.rating.rating, 1200.0);
    }

    #[test]
    fn test_lazy_human_creation() {
        let registry = registry();
        let player = registry.get_or_create(&"alice".to_string()).unwrap();
        assert_eq!(player.kind, PlayerKind::Human);
        assert_eq!(player.rating.rating, 1200.0);
        assert_eq!(player.games_played, 0);
        assert!(!player.accepted_terms);

        // Second lookup returns the same record rather than recreating it
        let again = registry.get_or_create(&"alice".to_string()).unwrap();
        assert_eq!(again.created_at, player.created_at);
    }

    #[test]
    fn test_terms_acceptance() {
        let registry = registry();
        registry
            .record_terms_acceptance(&"alice".to_string(), Some("Alice A.".to_string()))
            .unwrap();

        let player = registry.get_or_create(&"alice".to_string()).unwrap();
        assert!(player.accepted_terms);
        assert_eq!(player.signed_name.as_deref(), Some("Alice A."));

        // Re-accepting without a name keeps the recorded name
        registry
            .record_terms_acceptance(&"alice".to_string(), None)
            .unwrap();
        let player = registry.get_or_create(&"alice".to_string()).unwrap();
        assert_eq!(player.signed_name.as_deref(), Some("Alice A."));
    }

    #[test]
    fn test_is_guest() {
        assert!(PlayerRegistry::is_guest(GUEST_ID));
        assert!(!PlayerRegistry::is_guest("alice"));
    }
}
