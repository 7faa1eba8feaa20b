//! Rating strategy trait and shared types
//!
//! This module defines the interface every rating strategy implements and the
//! input/output types shared by all of them.

use crate::types::{PlayerId, PlayerKind, PlayerRating, RatingKind, TeamSide};
use serde::{Deserialize, Serialize};

/// A participant as the rating engine sees it: identity, kind, current rating
#[derive(Debug, Clone)]
pub struct RatedPlayer {
    pub id: PlayerId,
    pub kind: PlayerKind,
    pub rating: PlayerRating,
}

impl RatedPlayer {
    pub fn new(id: impl Into<PlayerId>, kind: PlayerKind, rating: PlayerRating) -> Self {
        Self {
            id: id.into(),
            kind,
            rating,
        }
    }
}

/// Rating change for one human participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub player_id: PlayerId,
    pub before: PlayerRating,
    pub after: PlayerRating,
}

/// Trait for applying a verified outcome to participant ratings
///
/// Implementations are pure given their inputs and must be invoked exactly
/// once per verified match; the verification engine owns that guarantee.
/// Guests contribute to team expectation but never appear in the output.
pub trait RatingStrategy: Send + Sync {
    /// Which strategy this is, recorded on matches and snapshots
    fn kind(&self) -> RatingKind;

    /// Rating a new player starts with under this strategy
    fn initial_rating(&self) -> PlayerRating;

    /// Compute new ratings for all human participants of a verified match
    ///
    /// # Arguments
    /// * `team_a` - roster of team A with current ratings
    /// * `team_b` - roster of team B with current ratings
    /// * `winner` - side that took the match
    fn apply(
        &self,
        team_a: &[RatedPlayer],
        team_b: &[RatedPlayer],
        winner: TeamSide,
    ) -> crate::error::Result<Vec<RatingUpdate>>;
}
