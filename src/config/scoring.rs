//! Scoring profile configuration
//!
//! A scoring profile is the immutable rule set a match is validated under:
//! target points, required winning margin, and the optional hard cap. Each
//! match snapshots its profile at creation so historical reports replay
//! deterministically under later configuration changes.

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// Immutable scoring parameters snapshotted per match at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringProfile {
    /// Points a side must reach to take a set
    pub target: u16,
    /// Required winning margin once the target is reached
    pub win_by: u16,
    /// Hard ceiling; at the cap any one-point lead takes the set.
    /// `None` disables the cap and the margin rule applies with no ceiling.
    pub cap: Option<u16>,
}

impl ScoringProfile {
    /// Profile for a target with the standard margin and a derived cap
    pub fn for_target(target: u16) -> Self {
        Self {
            target,
            win_by: 2,
            cap: Some(Self::derived_cap(target)),
        }
    }

    /// Derived cap: 30 for full-length sets, 15 for short games
    pub fn derived_cap(target: u16) -> u16 {
        if target >= 21 {
            30
        } else {
            15
        }
    }

    /// Replace the cap with an explicit value
    pub fn with_cap(mut self, cap: u16) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Disable the cap entirely
    pub fn without_cap(mut self) -> Self {
        self.cap = None;
        self
    }

    /// Validate profile parameters
    pub fn validate(&self) -> Result<()> {
        if self.target == 0 {
            return Err(LedgerError::ConfigurationError {
                message: "Scoring target must be greater than 0".to_string(),
            }
            .into());
        }
        if self.win_by == 0 {
            return Err(LedgerError::ConfigurationError {
                message: "Winning margin must be greater than 0".to_string(),
            }
            .into());
        }
        if let Some(cap) = self.cap {
            if cap < self.target {
                return Err(LedgerError::ConfigurationError {
                    message: format!("Cap {} is below the target {}", cap, self.target),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::for_target(21)
    }
}

/// Ambient scoring settings, the source profiles are built from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Default set target when a report does not specify one
    pub target_default: u16,
    /// Required winning margin
    pub win_by: u16,
    /// Explicit cap override; when unset the cap is derived from the target
    pub cap_override: Option<u16>,
    /// Whether the cap applies at all
    pub cap_enabled: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            target_default: 21,
            win_by: 2,
            cap_override: None,
            cap_enabled: true,
        }
    }
}

impl ScoringSettings {
    /// Build the profile a new match is snapshotted with
    pub fn profile_for(&self, target: Option<u16>) -> ScoringProfile {
        let target = target.unwrap_or(self.target_default);
        let cap = if !self.cap_enabled {
            None
        } else {
            Some(
                self.cap_override
                    .unwrap_or_else(|| ScoringProfile::derived_cap(target)),
            )
        };
        ScoringProfile {
            target,
            win_by: self.win_by,
            cap,
        }
    }
}
