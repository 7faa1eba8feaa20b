//! Glicko-2 rating strategy
//!
//! Each verified match is treated as a one-opponent rating period per
//! participant, computed per the standard Glicko-2 update from the
//! skillratings crate. Doubles oppose each participant against the opposing
//! team's averaged composite triple, mirroring the Elo team-mean rule. Guests
//! contribute to the composite and are never updated.

use crate::config::rating::RatingSettings;
use crate::error::{LedgerError, Result};
use crate::rating::strategy::{RatedPlayer, RatingStrategy, RatingUpdate};
use crate::types::{PlayerKind, PlayerRating, RatingKind, TeamSide};
use crate::utils::mean_or;
use serde::{Deserialize, Serialize};
use skillratings::glicko2::{glicko2, Glicko2Config, Glicko2Rating};
use skillratings::Outcomes;

/// Configuration for the Glicko-2 strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glicko2Settings {
    /// Volatility constraint; smaller values change volatility more slowly
    pub tau: f64,
    /// Convergence tolerance of the iterative volatility computation
    pub convergence_tolerance: f64,
    /// Initial rating for new players
    pub initial_rating: f64,
    /// Initial rating deviation for new players
    pub initial_deviation: f64,
    /// Initial volatility for new players
    pub initial_volatility: f64,
}

impl Default for Glicko2Settings {
    fn default() -> Self {
        Self {
            tau: 0.5,
            convergence_tolerance: 0.000_001,
            initial_rating: 1200.0,
            initial_deviation: 350.0,
            initial_volatility: 0.06,
        }
    }
}

impl From<&RatingSettings> for Glicko2Settings {
    fn from(settings: &RatingSettings) -> Self {
        Self {
            tau: settings.glicko_tau,
            convergence_tolerance: 0.000_001,
            initial_rating: settings.default_rating,
            initial_deviation: settings.default_deviation,
            initial_volatility: settings.default_volatility,
        }
    }
}

impl Glicko2Settings {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.tau <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "Tau must be positive".to_string(),
            }
            .into());
        }
        if self.convergence_tolerance <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "Convergence tolerance must be positive".to_string(),
            }
            .into());
        }
        if self.initial_deviation <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "Initial deviation must be positive".to_string(),
            }
            .into());
        }
        if self.initial_volatility <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "Initial volatility must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Glicko-2 rating strategy implementation
#[derive(Debug)]
pub struct Glicko2Strategy {
    config: Glicko2Settings,
}

impl Glicko2Strategy {
    /// Create a new Glicko-2 strategy
    pub fn new(config: Glicko2Settings) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Averaged composite triple a team presents to its opponents
    fn composite(team: &[RatedPlayer]) -> Glicko2Rating {
        let ratings: Vec<f64> = team.iter().map(|p| p.rating.rating).collect();
        let deviations: Vec<f64> = team.iter().map(|p| p.rating.deviation).collect();
        let volatilities: Vec<f64> = team.iter().map(|p| p.rating.volatility).collect();
        Glicko2Rating {
            rating: mean_or(&ratings, 0.0),
            deviation: mean_or(&deviations, 350.0),
            volatility: mean_or(&volatilities, 0.06),
        }
    }

    fn glicko_config(&self) -> Glicko2Config {
        Glicko2Config {
            tau: self.config.tau,
            convergence_tolerance: self.config.convergence_tolerance,
        }
    }
}

impl RatingStrategy for Glicko2Strategy {
    fn kind(&self) -> RatingKind {
        RatingKind::Glicko2
    }

    fn initial_rating(&self) -> PlayerRating {
        PlayerRating {
            rating: self.config.initial_rating,
            deviation: self.config.initial_deviation,
            volatility: self.config.initial_volatility,
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

        let config = self.glicko_config();
        let composite_a = Self::composite(team_a);
        let composite_b = Self::composite(team_b);

        let mut updates = Vec::new();
        for (team, opponent, side) in [
            (team_a, composite_b, TeamSide::A),
            (team_b, composite_a, TeamSide::B),
        ] {
            let outcome = if winner == side {
                Outcomes::WIN
            } else {
                Outcomes::LOSS
            };
            for player in team.iter().filter(|p| p.kind == PlayerKind::Human) {
                let (updated, _) = glicko2(&player.rating.into(), &opponent, &outcome, &config);
                updates.push(RatingUpdate {
                    player_id: player.id.clone(),
                    before: player.rating,
                    after: updated.into(),
                });
            }
        }

        Ok(updates)
    }
}
