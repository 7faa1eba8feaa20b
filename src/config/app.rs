//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! rally-ledger core, including environment variable loading, TOML file
//! loading for the demo binary, and validation.

use crate::config::rating::RatingSettings;
use crate::config::scoring::ScoringSettings;
use crate::types::RatingKind;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub scoring: ScoringSettings,
    pub rating: RatingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "rally-ledger".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Scoring settings
        if let Ok(target) = env::var("POINTS_TARGET_DEFAULT") {
            config.scoring.target_default = target
                .parse()
                .map_err(|_| anyhow!("Invalid POINTS_TARGET_DEFAULT value: {}", target))?;
        }
        if let Ok(win_by) = env::var("POINTS_WIN_BY") {
            config.scoring.win_by = win_by
                .parse()
                .map_err(|_| anyhow!("Invalid POINTS_WIN_BY value: {}", win_by))?;
        }
        if let Ok(cap) = env::var("POINTS_CAP") {
            match cap.to_lowercase().as_str() {
                "off" | "none" => config.scoring.cap_enabled = false,
                value => {
                    config.scoring.cap_override = Some(
                        value
                            .parse()
                            .map_err(|_| anyhow!("Invalid POINTS_CAP value: {}", cap))?,
                    );
                }
            }
        }

        // Rating settings
        if let Ok(strategy) = env::var("RATING_STRATEGY") {
            config.rating.strategy = parse_rating_kind(&strategy)?;
        }
        if let Ok(k) = env::var("K_FACTOR") {
            config.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k))?;
        }
        if let Ok(rating) = env::var("DEFAULT_RATING") {
            config.rating.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_RATING value: {}", rating))?;
        }
        if let Ok(rating) = env::var("GUEST_RATING") {
            config.rating.guest_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid GUEST_RATING value: {}", rating))?;
        }
        if let Ok(tau) = env::var("GLICKO_TAU") {
            config.rating.glicko_tau = tau
                .parse()
                .map_err(|_| anyhow!("Invalid GLICKO_TAU value: {}", tau))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Parse a rating strategy name
pub fn parse_rating_kind(value: &str) -> Result<RatingKind> {
    match value.to_lowercase().as_str() {
        "elo" => Ok(RatingKind::Elo),
        "glicko2" | "glicko-2" => Ok(RatingKind::Glicko2),
        _ => Err(anyhow!(
            "Invalid rating strategy: {} (expected elo or glicko2)",
            value
        )),
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate scoring settings
    if config.scoring.target_default == 0 {
        return Err(anyhow!("Default target must be greater than 0"));
    }
    if config.scoring.win_by == 0 {
        return Err(anyhow!("Winning margin must be greater than 0"));
    }
    if let Some(cap) = config.scoring.cap_override {
        if cap < config.scoring.target_default {
            return Err(anyhow!(
                "Cap override {} is below the default target {}",
                cap,
                config.scoring.target_default
            ));
        }
    }

    // Validate rating settings
    config.rating.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.service.name, "rally-ledger");
        assert_eq!(config.scoring.target_default, 21);
        assert_eq!(config.rating.k_factor, 32.0);
    }

    #[test]
    fn test_parse_rating_kind() {
        assert_eq!(parse_rating_kind("elo").unwrap(), RatingKind::Elo);
        assert_eq!(parse_rating_kind("Glicko2").unwrap(), RatingKind::Glicko2);
        assert_eq!(parse_rating_kind("glicko-2").unwrap(), RatingKind::Glicko2);
        assert!(parse_rating_kind("trueskill").is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = AppConfig::default();
        config.service.log_level = "verbose".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_cap_override_below_target_rejected() {
        let mut config = AppConfig::default();
        config.scoring.cap_override = Some(15);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert!(validate_config(&parsed).is_ok());
        assert_eq!(parsed.scoring.target_default, config.scoring.target_default);
    }
}
