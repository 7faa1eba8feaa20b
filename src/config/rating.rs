//! Rating system configuration

use crate::error::{LedgerError, Result};
use crate::types::{PlayerRating, RatingKind};
use serde::{Deserialize, Serialize};

/// Settings shared by the rating strategies and the player registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Strategy applied to matches that do not request one explicitly
    pub strategy: RatingKind,
    /// Elo K-factor
    pub k_factor: f64,
    /// Initial rating for lazily created players
    pub default_rating: f64,
    /// Initial Glicko-2 deviation for new players
    pub default_deviation: f64,
    /// Initial Glicko-2 volatility for new players
    pub default_volatility: f64,
    /// Fixed rating of the guest singleton; never mutated
    pub guest_rating: f64,
    /// Glicko-2 volatility constraint
    pub glicko_tau: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            strategy: RatingKind::Elo,
            k_factor: 32.0,
            default_rating: 1200.0,
            default_deviation: 350.0,
            default_volatility: 0.06,
            guest_rating: 1200.0,
            glicko_tau: 0.5,
        }
    }
}

impl RatingSettings {
    /// Rating a lazily created human starts with
    pub fn initial_rating(&self) -> PlayerRating {
        PlayerRating {
            rating: self.default_rating,
            deviation: self.default_deviation,
            volatility: self.default_volatility,
        }
    }

    /// Fixed rating of the guest singleton
    pub fn guest_rating(&self) -> PlayerRating {
        PlayerRating {
            rating: self.guest_rating,
            deviation: self.default_deviation,
            volatility: self.default_volatility,
        }
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<()> {
        if self.k_factor <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }
        if self.default_deviation <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "Default deviation must be positive".to_string(),
            }
            .into());
        }
        if self.default_volatility <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "Default volatility must be positive".to_string(),
            }
            .into());
        }
        if self.glicko_tau <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "Glicko tau must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
