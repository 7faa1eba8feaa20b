//! Elo rating strategy
//!
//! Standard pairwise Elo with a configurable K-factor, via the skillratings
//! crate. A team's effective rating is the mean of its members' ratings; the
//! composite-vs-composite delta is applied identically to every human member,
//! so doubles partners rise and fall together. The guest slot contributes its
//! fixed rating to the team mean but is never updated.

use crate::config::rating::RatingSettings;
use crate::error::{LedgerError, Result};
use crate::rating::strategy::{RatedPlayer, RatingStrategy, RatingUpdate};
use crate::types::{PlayerKind, PlayerRating, RatingKind, TeamSide};
use crate::utils::mean_or;
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;

/// Configuration for the Elo strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloSettings {
    /// Maximum rating change per match
    pub k_factor: f64,
    /// Initial rating for new players
    pub initial_rating: f64,
}

impl Default for EloSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: 1200.0,
        }
    }
}

impl From<&RatingSettings> for EloSettings {
    fn from(settings: &RatingSettings) -> Self {
        Self {
            k_factor: settings.k_factor,
            initial_rating: settings.default_rating,
        }
    }
}

impl EloSettings {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.k_factor <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Elo rating strategy implementation
#[derive(Debug)]
pub struct EloStrategy {
    config: EloSettings,
}

impl EloStrategy {
    /// Create a new Elo strategy
    pub fn new(config: EloSettings) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Expected score of a team rated `a` against a team rated `b`
    pub fn expected(&self, a: f64, b: f64) -> f64 {
        let (expected_a, _) = expected_score(&EloRating { rating: a }, &EloRating { rating: b });
        expected_a
    }

    fn team_mean(team: &[RatedPlayer]) -> f64 {
        let ratings: Vec<f64> = team.iter().map(|p| p.rating.rating).collect();
        mean_or(&ratings, 0.0)
    }
}

impl RatingStrategy for EloStrategy {
    fn kind(&self) -> RatingKind {
        RatingKind::Elo
    }

    fn initial_rating(&self) -> PlayerRating {
        PlayerRating {
            rating: self.config.initial_rating,
            ..PlayerRating::default()
        }
    }

    fn apply(
        &self,
        team_a: &[RatedPlayer],
        team_b: &[RatedPlayer],
        winner: TeamSide,
    ) -> Result<Vec<RatingUpdate>> {
        if team_a.is_empty() || team_b.is_empty() {
            return Err(LedgerError::InvalidRoster {
                reason: "Both teams need at least one player for rating".to_string(),
            }
            .into());
        }

        let mean_a = Self::team_mean(team_a);
        let mean_b = Self::team_mean(team_b);

        let outcome = match winner {
            TeamSide::A => Outcomes::WIN,
            TeamSide::B => Outcomes::LOSS,
        };
        let config = EloConfig {
            k: self.config.k_factor,
        };
        let (new_a, new_b) = elo(
            &EloRating { rating: mean_a },
            &EloRating { rating: mean_b },
            &outcome,
            &config,
        );

        // Every human member of a team receives the identical composite delta
        let delta_a = new_a.rating - mean_a;
        let delta_b = new_b.rating - mean_b;

        let mut updates = Vec::new();
        for (team, delta) in [(team_a, delta_a), (team_b, delta_b)] {
            for player in team.iter().filter(|p| p.kind == PlayerKind::Human) {
                updates.push(RatingUpdate {
                    player_id: player.id.clone(),
                    before: player.rating,
                    after: PlayerRating {
                        rating: player.rating.rating + delta,
                        ..player.rating
                    },
                });
            }
        }

        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human(id: &str, rating: f64) -> RatedPlayer {
        RatedPlayer::new(
            id,
            PlayerKind::Human,
            PlayerRating {
                rating,
                ..PlayerRating::default()
            },
        )
    }

    fn guest(rating: f64) -> RatedPlayer {
        RatedPlayer::new(
            "guest",
            PlayerKind::Guest,
            PlayerRating {
                rating,
                ..PlayerRating::default()
            },
        )
    }

    fn strategy() -> EloStrategy {
        EloStrategy::new(EloSettings::default()).unwrap()
    }

    #[test]
    fn test_settings_validation() {
        assert!(EloSettings::default().validate().is_ok());
        let invalid = EloSettings {
            k_factor: 0.0,
            ..EloSettings::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_expected_score_symmetry() {
        let s = strategy();
        assert!((s.expected(1200.0, 1200.0) - 0.5).abs() < 1e-9);
        assert!(s.expected(1400.0, 1200.0) > 0.5);
        assert!(s.expected(1200.0, 1400.0) < 0.5);
        let sum = s.expected(1350.0, 1180.0) + s.expected(1180.0, 1350.0);
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_singles_equal_ratings_delta_16() {
        let s = strategy();
        let updates = s
            .apply(&[human("a", 1200.0)], &[human("b", 1200.0)], TeamSide::A)
            .unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].player_id, "a");
        assert!((updates[0].after.rating - 1216.0).abs() < 1e-9);
        assert!((updates[1].after.rating - 1184.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_sum_for_equal_team_sizes() {
        let s = strategy();
        let updates = s
            .apply(&[human("a", 1321.5)], &[human("b", 1187.25)], TeamSide::B)
            .unwrap();

        let total: f64 = updates
            .iter()
            .map(|u| u.after.rating - u.before.rating)
            .sum();
        assert!(total.abs() < 1e-9);
    }

    #[test]
    fn test_doubles_identical_delta_per_member() {
        let s = strategy();
        let updates = s
            .apply(
                &[human("a1", 1300.0), human("a2", 1100.0)],
                &[human("b1", 1250.0), human("b2", 1150.0)],
                TeamSide::A,
            )
            .unwrap();

        assert_eq!(updates.len(), 4);
        let delta_a1 = updates[0].after.rating - updates[0].before.rating;
        let delta_a2 = updates[1].after.rating - updates[1].before.rating;
        assert!((delta_a1 - delta_a2).abs() < 1e-9);
        assert!(delta_a1 > 0.0);

        // Team means are both 1200, so the winners gain exactly K/2
        assert!((delta_a1 - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_guest_contributes_but_never_updates() {
        let s = strategy();
        let updates = s
            .apply(
                &[human("a1", 1400.0), guest(1200.0)],
                &[human("b1", 1300.0), human("b2", 1300.0)],
                TeamSide::A,
            )
            .unwrap();

        // Guest excluded from the output
        assert_eq!(updates.len(), 3);
        assert!(updates.iter().all(|u| u.player_id != "guest"));

        // The guest's fixed rating pulled team A's mean to 1300, so the
        // expectation was even and the winner's delta is K/2
        let delta = updates[0].after.rating - updates[0].before.rating;
        assert!((delta - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let s = strategy();
        let upset = s
            .apply(&[human("a", 1100.0)], &[human("b", 1400.0)], TeamSide::A)
            .unwrap();
        let expected_win = s
            .apply(&[human("a", 1400.0)], &[human("b", 1100.0)], TeamSide::A)
            .unwrap();

        let upset_delta = upset[0].after.rating - upset[0].before.rating;
        let expected_delta = expected_win[0].after.rating - expected_win[0].before.rating;
        assert!(upset_delta > expected_delta);
    }

    #[test]
    fn test_empty_team_rejected() {
        let s = strategy();
        assert!(s.apply(&[], &[human("b", 1200.0)], TeamSide::A).is_err());
    }

    #[test]
    fn test_deviation_and_volatility_untouched() {
        let s = strategy();
        let updates = s
            .apply(&[human("a", 1200.0)], &[human("b", 1200.0)], TeamSide::A)
            .unwrap();
        assert_eq!(updates[0].after.deviation, updates[0].before.deviation);
        assert_eq!(updates[0].after.volatility, updates[0].before.volatility);
    }
}
