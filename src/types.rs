//! Common types used throughout the match ledger

use crate::config::scoring::ScoringProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillratings::glicko2::Glicko2Rating;
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Unique identifier for players and guests
pub type PlayerId = String;

/// Monotonic identifier for matches, issued by the match store
pub type MatchId = u64;

/// Unique identifier for rating snapshots
pub type SnapshotId = Uuid;

/// Kind of participant in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Guest,
}

/// Match mode determining roster sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    Singles,
    Doubles,
}

impl MatchMode {
    /// Players per team for this mode
    pub fn team_size(&self) -> usize {
        match self {
            MatchMode::Singles => 1,
            MatchMode::Doubles => 2,
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Singles => write!(f, "singles"),
            MatchMode::Doubles => write!(f, "doubles"),
        }
    }
}

/// One of the two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSide::A => write!(f, "A"),
            TeamSide::B => write!(f, "B"),
        }
    }
}

/// Raw point score of a single set as reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u16,
    pub b: u16,
}

impl SetScore {
    pub fn new(a: u16, b: u16) -> Self {
        Self { a, b }
    }

    /// Points scored by the given side
    pub fn points_for(&self, side: TeamSide) -> u16 {
        match side {
            TeamSide::A => self.a,
            TeamSide::B => self.b,
        }
    }
}

impl std::fmt::Display for SetScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Raw match report as supplied by the reporting participant
///
/// The raw report is stored verbatim on the match so historical reports can be
/// re-validated against their profile snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "sets")]
pub enum ScoreReport {
    /// Only the winning side of each set is reported
    SetWinners(Vec<TeamSide>),
    /// Full point scores are reported; set winners are derived by validation
    PointScores(Vec<SetScore>),
}

/// A validated set: the raw score (when reported) and the derived winner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetOutcome {
    pub score: Option<SetScore>,
    pub winner: TeamSide,
}

/// Decision carried by a verification vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteDecision {
    Approve,
    Reject,
}

/// A verification vote from a required approver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: PlayerId,
    pub decision: VoteDecision,
    pub cast_at: DateTime<Utc>,
}

/// Trust state of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Pending,
    Verified,
    Rejected,
}

impl MatchStatus {
    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Verified | MatchStatus::Rejected)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Verified => write!(f, "verified"),
            MatchStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Which rating strategy rates a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingKind {
    Elo,
    Glicko2,
}

impl std::fmt::Display for RatingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingKind::Elo => write!(f, "elo"),
            RatingKind::Glicko2 => write!(f, "glicko2"),
        }
    }
}

/// Rating state for a player
///
/// Elo reads and writes only the scalar `rating`; Glicko-2 uses the full
/// triple. Values are kept at full precision; canonical rounding happens at
/// the query surface, never between matches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerRating {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

impl Default for PlayerRating {
    fn default() -> Self {
        Self {
            rating: 1200.0,
            deviation: 350.0,
            volatility: 0.06,
        }
    }
}

impl From<Glicko2Rating> for PlayerRating {
    fn from(rating: Glicko2Rating) -> Self {
        Self {
            rating: rating.rating,
            deviation: rating.deviation,
            volatility: rating.volatility,
        }
    }
}

impl From<PlayerRating> for Glicko2Rating {
    fn from(rating: PlayerRating) -> Self {
        Self {
            rating: rating.rating,
            deviation: rating.deviation,
            volatility: rating.volatility,
        }
    }
}

/// A registered participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub kind: PlayerKind,
    pub rating: PlayerRating,
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub accepted_terms: bool,
    pub signed_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player record with an initial rating
    pub fn new(id: PlayerId, kind: PlayerKind, rating: PlayerRating) -> Self {
        let now = crate::utils::current_timestamp();
        Self {
            id,
            kind,
            rating,
            games_played: 0,
            wins: 0,
            losses: 0,
            accepted_terms: false,
            signed_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a verified result: new rating plus win/loss bookkeeping
    pub fn record_result(&mut self, new_rating: PlayerRating, won: bool) {
        self.rating = new_rating;
        self.games_played += 1;
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.updated_at = crate::utils::current_timestamp();
    }
}

/// Request to create a match from a raw report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub mode: MatchMode,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub report: ScoreReport,
    pub reporter: PlayerId,
    /// Optional per-report target override (e.g. a short game to 11)
    pub target: Option<u16>,
    /// Optional per-report rating strategy override
    pub strategy: Option<RatingKind>,
    pub timestamp: DateTime<Utc>,
}

/// A recorded, possibly-unverified claim that a game occurred
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub mode: MatchMode,
    /// Raw report exactly as received
    pub report: ScoreReport,
    /// Scoring profile captured at creation; later configuration changes
    /// never retroactively alter history
    pub profile: ScoringProfile,
    /// Rating strategy captured at creation
    pub rating_kind: RatingKind,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub sets: Vec<SetOutcome>,
    pub winner: TeamSide,
    pub points_a: u32,
    pub points_b: u32,
    pub reporter: PlayerId,
    pub status: MatchStatus,
    /// All distinct human non-reporter participants, fixed at creation
    pub required_approvers: BTreeSet<PlayerId>,
    /// Current vote per approver, last-write-wins while pending
    pub votes: HashMap<PlayerId, Vote>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Match {
    /// All participant ids, team A first, in roster order
    pub fn participants(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    /// Roster for the given side
    pub fn roster(&self, side: TeamSide) -> &[PlayerId] {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    /// Whether the given player is on the winning team
    pub fn is_winner(&self, player_id: &PlayerId) -> bool {
        self.roster(self.winner).contains(player_id)
    }

    /// Number of current approve votes
    pub fn approvals(&self) -> usize {
        self.votes
            .values()
            .filter(|v| v.decision == VoteDecision::Approve)
            .count()
    }

    /// Compact score line, e.g. `21-19, 18-21, 30-29` or `A, B, A`
    pub fn score_line(&self) -> String {
        let parts: Vec<String> = self
            .sets
            .iter()
            .map(|set| match set.score {
                Some(score) => score.to_string(),
                None => set.winner.to_string(),
            })
            .collect();
        parts.join(", ")
    }

    /// Human-readable one-line summary for verification prompts
    pub fn summary(&self) -> String {
        format!(
            "{} match #{}: {} vs {}, {} (winner: team {}, reported by {})",
            self.mode,
            self.id,
            self.team_a.join("/"),
            self.team_b.join("/"),
            self.score_line(),
            self.winner,
            self.reporter
        )
    }
}

/// Immutable before/after rating record, appended once per human player per
/// verified match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSnapshot {
    pub id: SnapshotId,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub strategy: RatingKind,
    pub before: PlayerRating,
    pub after: PlayerRating,
    pub recorded_at: DateTime<Utc>,
}

/// Notification event: a match became pending and needs this approver's vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequested {
    pub match_id: MatchId,
    pub approver: PlayerId,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

/// Notification event: a match reached a terminal state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResolved {
    pub match_id: MatchId,
    pub status: MatchStatus,
    pub timestamp: DateTime<Utc>,
}
