//! Deterministic validation of raw score reports
//!
//! A report is validated against the match's scoring profile snapshot:
//! per-set legality first, then best-of-three consistency. Identical inputs
//! always validate identically, which is why matches store the raw report
//! alongside the profile.

use crate::config::scoring::ScoringProfile;
use crate::error::{LedgerError, Result};
use crate::types::{ScoreReport, SetOutcome, SetScore, TeamSide};

/// Result of validating a raw report
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOutcome {
    /// Validated sets with derived winners
    pub sets: Vec<SetOutcome>,
    /// Side that took the match (first to two sets)
    pub winner: TeamSide,
    /// Total points scored by team A across counted sets
    pub points_a: u32,
    /// Total points scored by team B across counted sets
    pub points_b: u32,
}

/// Whether a set score is legal under the profile
pub fn valid_set(score: &SetScore, profile: &ScoringProfile) -> bool {
    check_set(score, profile).is_ok()
}

/// Derive the set winner, or explain why the score is illegal
fn check_set(score: &SetScore, profile: &ScoringProfile) -> std::result::Result<TeamSide, String> {
    let (a, b) = (score.a, score.b);
    if a == b {
        return Err(format!("set {} has no winner", score));
    }
    let max = a.max(b);
    let margin = a.abs_diff(b);

    if let Some(cap) = profile.cap {
        if max > cap {
            return Err(format!("set {} exceeds the cap of {}", score, cap));
        }
        // Sudden death at the cap: any one-point lead takes the set
        if max == cap {
            return Ok(if a > b { TeamSide::A } else { TeamSide::B });
        }
    }
    if max < profile.target {
        return Err(format!(
            "set {} has not reached the target of {}",
            score, profile.target
        ));
    }
    if margin < profile.win_by {
        return Err(format!(
            "set {} was not won by at least {}",
            score, profile.win_by
        ));
    }
    Ok(if a > b { TeamSide::A } else { TeamSide::B })
}

/// Validate a raw report against a scoring profile
///
/// Returns the validated sets, the match winner, and the point totals over
/// counted sets, or fails with `InvalidScore`.
pub fn validate(report: &ScoreReport, profile: &ScoringProfile) -> Result<ValidatedOutcome> {
    profile.validate()?;

    match report {
        ScoreReport::SetWinners(winners) => validate_set_winners(winners),
        ScoreReport::PointScores(scores) => validate_point_scores(scores, profile),
    }
}

fn invalid(reason: String) -> anyhow::Error {
    LedgerError::InvalidScore { reason }.into()
}

fn validate_set_winners(winners: &[TeamSide]) -> Result<ValidatedOutcome> {
    if winners.len() < 2 || winners.len() > 3 {
        return Err(invalid(format!(
            "a match report carries two or three sets, got {}",
            winners.len()
        )));
    }

    let mut sets_a = 0u8;
    let mut sets_b = 0u8;
    let mut sets = Vec::with_capacity(winners.len());
    for winner in winners {
        if sets_a == 2 || sets_b == 2 {
            return Err(invalid(
                "a set was reported after the match was already decided".to_string(),
            ));
        }
        match winner {
            TeamSide::A => sets_a += 1,
            TeamSide::B => sets_b += 1,
        }
        sets.push(SetOutcome {
            score: None,
            winner: *winner,
        });
    }

    let winner = match_winner(sets_a, sets_b)?;
    Ok(ValidatedOutcome {
        sets,
        winner,
        points_a: 0,
        points_b: 0,
    })
}

fn validate_point_scores(scores: &[SetScore], profile: &ScoringProfile) -> Result<ValidatedOutcome> {
    if scores.len() < 2 || scores.len() > 3 {
        return Err(invalid(format!(
            "a match report carries two or three sets, got {}",
            scores.len()
        )));
    }

    let mut sets_a = 0u8;
    let mut sets_b = 0u8;
    let mut points_a = 0u32;
    let mut points_b = 0u32;
    let mut sets = Vec::with_capacity(scores.len());
    for score in scores {
        if sets_a == 2 || sets_b == 2 {
            return Err(invalid(
                "a set was reported after the match was already decided".to_string(),
            ));
        }
        let winner = check_set(score, profile).map_err(invalid)?;
        match winner {
            TeamSide::A => sets_a += 1,
            TeamSide::B => sets_b += 1,
        }
        points_a += u32::from(score.a);
        points_b += u32::from(score.b);
        sets.push(SetOutcome {
            score: Some(*score),
            winner,
        });
    }

    let winner = match_winner(sets_a, sets_b)?;
    Ok(ValidatedOutcome {
        sets,
        winner,
        points_a,
        points_b,
    })
}

fn match_winner(sets_a: u8, sets_b: u8) -> Result<TeamSide> {
    if sets_a == 2 {
        Ok(TeamSide::A)
    } else if sets_b == 2 {
        Ok(TeamSide::B)
    } else {
        Err(invalid(
            "the reported sets do not decide the match; a deciding set is required".to_string(),
        ))
    }
}
