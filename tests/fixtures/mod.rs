//! Shared fixtures for integration tests

// Each test binary uses its own subset of the fixtures
#![allow(dead_code)]

use rally_ledger::config::AppConfig;
use rally_ledger::notify::RecordingNotifier;
use rally_ledger::service::AppState;
use rally_ledger::types::{
    MatchMode, MatchReport, PlayerId, RatingKind, ScoreReport, SetScore, TeamSide, VoteDecision,
};
use rally_ledger::utils::current_timestamp;
use std::sync::Arc;

/// A complete in-memory system with a recording notifier
pub struct TestSystem {
    pub state: AppState,
    pub notifier: Arc<RecordingNotifier>,
}

/// Build a system with default configuration (Elo, K=32, rating 1200)
pub fn create_test_system() -> TestSystem {
    create_test_system_with(AppConfig::default())
}

/// Build a system with explicit configuration
pub fn create_test_system_with(config: AppConfig) -> TestSystem {
    let notifier = Arc::new(RecordingNotifier::new());
    let state = AppState::in_memory(config, notifier.clone()).expect("wiring must succeed");
    TestSystem { state, notifier }
}

/// Straight-sets point-score report
pub fn straight_sets() -> ScoreReport {
    ScoreReport::PointScores(vec![SetScore::new(21, 19), SetScore::new(21, 17)])
}

pub fn singles_report(a: &str, b: &str, reporter: &str) -> MatchReport {
    MatchReport {
        mode: MatchMode::Singles,
        team_a: vec![a.to_string()],
        team_b: vec![b.to_string()],
        report: straight_sets(),
        reporter: reporter.to_string(),
        target: None,
        strategy: None,
        timestamp: current_timestamp(),
    }
}

pub fn doubles_report(team_a: [&str; 2], team_b: [&str; 2], reporter: &str) -> MatchReport {
    MatchReport {
        mode: MatchMode::Doubles,
        team_a: team_a.iter().map(|s| s.to_string()).collect(),
        team_b: team_b.iter().map(|s| s.to_string()).collect(),
        report: straight_sets(),
        reporter: reporter.to_string(),
        target: None,
        strategy: None,
        timestamp: current_timestamp(),
    }
}

/// Doubles report where team B wins in three sets
pub fn doubles_report_b_wins(team_a: [&str; 2], team_b: [&str; 2], reporter: &str) -> MatchReport {
    MatchReport {
        report: ScoreReport::PointScores(vec![
            SetScore::new(21, 18),
            SetScore::new(19, 21),
            SetScore::new(12, 21),
        ]),
        ..doubles_report(team_a, team_b, reporter)
    }
}

/// Report pinned to a specific rating strategy
pub fn singles_report_with_strategy(
    a: &str,
    b: &str,
    reporter: &str,
    strategy: RatingKind,
) -> MatchReport {
    MatchReport {
        strategy: Some(strategy),
        ..singles_report(a, b, reporter)
    }
}

/// Record approvals from all the given voters, asserting none is rejected
pub async fn approve_all(system: &TestSystem, match_id: u64, voters: &[&str]) {
    for voter in voters {
        system
            .state
            .engine
            .record_vote(match_id, &voter.to_string(), VoteDecision::Approve)
            .await
            .expect("approval must be accepted");
    }
}

/// Current rating of a player straight from the store (full precision)
pub fn raw_rating(system: &TestSystem, id: &str) -> f64 {
    system
        .state
        .registry
        .get_or_create(&id.to_string())
        .expect("player lookup must succeed")
        .rating
        .rating
}

pub fn side_name(side: TeamSide) -> &'static str {
    match side {
        TeamSide::A => "A",
        TeamSide::B => "B",
    }
}

pub fn as_ids(names: &[&str]) -> Vec<PlayerId> {
    names.iter().map(|n| n.to_string()).collect()
}
