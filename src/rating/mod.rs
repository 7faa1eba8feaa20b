//! Pluggable rating strategies built on the skillratings crate
//!
//! This module provides the rating strategy interface and the Elo and
//! Glicko-2 implementations, chosen per match and recorded alongside the
//! match's rating snapshots.

pub mod elo;
pub mod glicko2;
pub mod strategy;

use crate::config::rating::RatingSettings;
use crate::error::Result;
use crate::types::{PlayerRating, RatingKind};
use crate::utils::round_to;
use std::sync::Arc;

// Re-export commonly used types
pub use elo::{EloSettings, EloStrategy};
pub use glicko2::{Glicko2Settings, Glicko2Strategy};
pub use strategy::{RatedPlayer, RatingStrategy, RatingUpdate};

/// Construct the strategy implementation for a recorded kind
pub fn strategy_for(kind: RatingKind, settings: &RatingSettings) -> Result<Arc<dyn RatingStrategy>> {
    match kind {
        RatingKind::Elo => Ok(Arc::new(EloStrategy::new(EloSettings::from(settings))?)),
        RatingKind::Glicko2 => Ok(Arc::new(Glicko2Strategy::new(Glicko2Settings::from(
            settings,
        ))?)),
    }
}

/// Round a rating to the strategy's canonical output precision
///
/// Applied only at the outward boundary (query surface, summaries); stored
/// ratings keep full precision so successive matches never compound rounding
/// error.
pub fn canonical_rating(kind: RatingKind, rating: &PlayerRating) -> PlayerRating {
    match kind {
        RatingKind::Elo => PlayerRating {
            rating: rating.rating.round(),
            ..*rating
        },
        RatingKind::Glicko2 => PlayerRating {
            rating: round_to(rating.rating, 2),
            deviation: round_to(rating.deviation, 2),
            volatility: round_to(rating.volatility, 4),
        },
    }
}
