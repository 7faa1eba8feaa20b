//! Read-only query surface
//!
//! Leaderboard and history lookups over the stores. Ratings leave this
//! surface canonically rounded for their strategy; the stores themselves keep
//! full precision.

use crate::config::rating::RatingSettings;
use crate::error::Result;
use crate::rating::canonical_rating;
use crate::store::{MatchStore, PlayerStore, SnapshotStore};
use crate::types::{Match, MatchId, PlayerId, PlayerKind, PlayerRating, RatingSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub rating: f64,
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
}

/// Read-only queries over players, matches, and snapshots
#[derive(Clone)]
pub struct QueryService {
    players: Arc<dyn PlayerStore>,
    matches: Arc<dyn MatchStore>,
    snapshots: Arc<dyn SnapshotStore>,
    rating: RatingSettings,
}

impl QueryService {
    pub fn new(
        players: Arc<dyn PlayerStore>,
        matches: Arc<dyn MatchStore>,
        snapshots: Arc<dyn SnapshotStore>,
        rating: RatingSettings,
    ) -> Self {
        Self {
            players,
            matches,
            snapshots,
            rating,
        }
    }

    /// Current rating of a player, canonically rounded; `None` if unknown
    pub fn rating_of(&self, player_id: &PlayerId) -> Result<Option<PlayerRating>> {
        Ok(self
            .players
            .get(player_id)?
            .map(|player| canonical_rating(self.rating.strategy, &player.rating)))
    }

    /// Top `n` humans by current rating, descending, ties broken by id
    pub fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>> {
        let mut players = self.players.all()?;
        players.retain(|player| player.kind == PlayerKind::Human);
        players.sort_by(|a, b| {
            b.rating
                .rating
                .partial_cmp(&a.rating.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        players.truncate(n);

        Ok(players
            .into_iter()
            .map(|player| LeaderboardEntry {
                rating: canonical_rating(self.rating.strategy, &player.rating).rating,
                player_id: player.id,
                games_played: player.games_played,
                wins: player.wins,
                losses: player.losses,
            })
            .collect())
    }

    /// Matches a player participated in, most recent first
    pub fn match_history(&self, player_id: &PlayerId) -> Result<Vec<Match>> {
        self.matches.for_player(player_id)
    }

    /// Audit trail of a player's rating changes, in append order
    pub fn snapshots_for(&self, player_id: &PlayerId) -> Result<Vec<RatingSnapshot>> {
        self.snapshots.for_player(player_id)
    }

    /// A single match by id
    pub fn match_by_id(&self, match_id: MatchId) -> Result<Option<Match>> {
        self.matches.get(match_id)
    }

    /// All pending matches, most recent first
    pub fn pending_matches(&self) -> Result<Vec<Match>> {
        self.matches.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryMatchStore, MemoryPlayerStore, MemorySnapshotStore};
    use crate::types::Player;

    fn service_with_players(players: Vec<Player>) -> QueryService {
        let store = Arc::new(MemoryPlayerStore::new());
        for player in players {
            store.put(player).unwrap();
        }
        QueryService::new(
            store,
            Arc::new(MemoryMatchStore::new()),
            Arc::new(MemorySnapshotStore::new()),
            RatingSettings::default(),
        )
    }

    fn human(id: &str, rating: f64) -> Player {
        let mut player = Player::new(id.to_string(), PlayerKind::Human, PlayerRating::default());
        player.rating.rating = rating;
        player
    }

    #[test]
    fn test_top_n_orders_descending_with_id_tie_break() {
        let service = service_with_players(vec![
            human("carol", 1250.0),
            human("bob", 1300.0),
            human("alice", 1300.0),
            human("dave", 1100.0),
        ]);

        let board = service.top_n(3).unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].player_id, "alice");
        assert_eq!(board[1].player_id, "bob");
        assert_eq!(board[2].player_id, "carol");
    }

    #[test]
    fn test_top_n_excludes_guests() {
        let mut guest = Player::new(
            "guest".to_string(),
            PlayerKind::Guest,
            PlayerRating {
                rating: 9999.0,
                ..PlayerRating::default()
            },
        );
        guest.games_played = 0;

        let store = Arc::new(MemoryPlayerStore::new());
        store.put(guest).unwrap();
        store.put(human("alice", 1200.0)).unwrap();
        let service = QueryService::new(
            store,
            Arc::new(MemoryMatchStore::new()),
            Arc::new(MemorySnapshotStore::new()),
            RatingSettings::default(),
        );

        let board = service.top_n(10).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].player_id, "alice");
    }

    #[test]
    fn test_rating_of_rounds_canonically() {
        let service = service_with_players(vec![human("alice", 1216.49)]);
        let rating = service.rating_of(&"alice".to_string()).unwrap().unwrap();
        assert_eq!(rating.rating, 1216.0);

        assert!(service.rating_of(&"unknown".to_string()).unwrap().is_none());
    }
}
