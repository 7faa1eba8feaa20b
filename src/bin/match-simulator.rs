//! Match Simulator CLI Tool
//!
//! Command-line tool that drives the full verification and rating stack
//! against in-memory stores: it reports simulated matches, casts approval
//! votes, and prints the resulting leaderboard.
//!
//! Usage:
//!   cargo run --bin match-simulator -- simulate --players 8 --matches 40
//!   cargo run --bin match-simulator -- simulate --strategy glicko2 --doubles 0.5
//!   cargo run --bin match-simulator -- demo

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use rally_ledger::config::app::parse_rating_kind;
use rally_ledger::config::AppConfig;
use rally_ledger::notify::Notifier;
use rally_ledger::service::AppState;
use rally_ledger::types::{
    ApprovalRequested, MatchMode, MatchReport, MatchResolved, MatchStatus, PlayerId, ScoreReport,
    SetScore, TeamSide, VoteDecision,
};
use rally_ledger::utils::current_timestamp;
use rally_ledger::VoteOutcome;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Drive the rally-ledger verification and rating core with simulated play")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML); defaults to environment + built-ins
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a season of matches with randomized outcomes
    Simulate {
        /// Number of players
        #[arg(short, long, default_value = "8")]
        players: usize,
        /// Number of matches to report
        #[arg(short, long, default_value = "40")]
        matches: usize,
        /// Fraction of matches played as doubles
        #[arg(short, long, default_value = "0.4")]
        doubles: f64,
        /// Probability that an approver rejects a report
        #[arg(short, long, default_value = "0.05")]
        reject_rate: f64,
        /// Rating strategy (elo or glicko2)
        #[arg(long)]
        strategy: Option<String>,
        /// RNG seed for reproducible runs
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Emit the final leaderboard as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run a short scripted demonstration
    Demo,
}

/// Notifier that prints verification traffic to the console
struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn approval_requested(&self, event: ApprovalRequested) -> rally_ledger::Result<()> {
        println!("  ✉️  asking {} to verify: {}", event.approver, event.summary);
        Ok(())
    }

    async fn resolved(&self, event: MatchResolved) -> rally_ledger::Result<()> {
        let mark = match event.status {
            MatchStatus::Verified => "✅",
            MatchStatus::Rejected => "❌",
            MatchStatus::Pending => "⏳",
        };
        println!("  {} match #{} {}", mark, event.match_id, event.status);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_toml_file(path)?,
        None => AppConfig::from_env()?,
    };

    match cli.command {
        Commands::Simulate {
            players,
            matches,
            doubles,
            reject_rate,
            strategy,
            seed,
            json,
        } => {
            if let Some(name) = strategy {
                config.rating.strategy = parse_rating_kind(&name)?;
            }
            simulate(config, players, matches, doubles, reject_rate, seed, json).await
        }
        Commands::Demo => demo(config).await,
    }
}

fn player_name(index: usize) -> PlayerId {
    format!("player-{}", index + 1)
}

/// Plausible best-of-three set scores where `winner` takes the match
fn random_sets(rng: &mut StdRng, winner: TeamSide) -> Vec<SetScore> {
    // Straight win, or drop the middle set and take the decider
    let winner_takes_set = if rng.random_bool(0.3) {
        vec![true, false, true]
    } else {
        vec![true, true]
    };

    winner_takes_set
        .into_iter()
        .map(|to_winner| {
            let loser_points = rng.random_range(0..20) as u16;
            let set_to_a = to_winner == (winner == TeamSide::A);
            if set_to_a {
                SetScore::new(21, loser_points)
            } else {
                SetScore::new(loser_points, 21)
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
async fn simulate(
    config: AppConfig,
    player_count: usize,
    match_count: usize,
    doubles_ratio: f64,
    reject_rate: f64,
    seed: u64,
    json: bool,
) -> Result<()> {
    if player_count < 4 {
        anyhow::bail!("Need at least 4 players to simulate doubles");
    }

    println!(
        "🏸 Simulating {} matches between {} players (strategy: {}, seed: {})",
        match_count, player_count, config.rating.strategy, seed
    );

    let state = AppState::in_memory(config, Arc::new(ConsoleNotifier))?;
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..match_count {
        // Pick distinct participants
        let mut pool: Vec<usize> = (0..player_count).collect();
        for i in 0..pool.len() {
            let j = rng.random_range(i..pool.len());
            pool.swap(i, j);
        }

        let is_doubles = rng.random_bool(doubles_ratio);
        let (team_a, team_b): (Vec<PlayerId>, Vec<PlayerId>) = if is_doubles {
            (
                vec![player_name(pool[0]), player_name(pool[1])],
                vec![player_name(pool[2]), player_name(pool[3])],
            )
        } else {
            (vec![player_name(pool[0])], vec![player_name(pool[1])])
        };

        let winner = if rng.random_bool(0.5) {
            TeamSide::A
        } else {
            TeamSide::B
        };
        let reporter = team_a[0].clone();
        let report = MatchReport {
            mode: if is_doubles {
                MatchMode::Doubles
            } else {
                MatchMode::Singles
            },
            team_a,
            team_b,
            report: ScoreReport::PointScores(random_sets(&mut rng, winner)),
            reporter,
            target: None,
            strategy: None,
            timestamp: current_timestamp(),
        };

        let record = state.engine.create_match(report).await?;
        println!("reported {}", record.summary());

        for approver in record.required_approvers.clone() {
            let decision = if rng.random_bool(reject_rate) {
                VoteDecision::Reject
            } else {
                VoteDecision::Approve
            };
            match state.engine.record_vote(record.id, &approver, decision).await {
                Ok(VoteOutcome::Pending { .. }) => continue,
                Ok(_) => break,
                Err(e) => {
                    println!("  vote from {} not accepted: {}", approver, e);
                    break;
                }
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.query.top_n(20)?)?);
    } else {
        print_leaderboard(&state)?;
    }
    print_stats(&state);
    Ok(())
}

async fn demo(config: AppConfig) -> Result<()> {
    println!("🏸 rally-ledger demo: report, verify, rate\n");
    let state = AppState::in_memory(config, Arc::new(ConsoleNotifier))?;

    // Singles: alice beats bob, bob corroborates
    let record = state
        .engine
        .create_match(MatchReport {
            mode: MatchMode::Singles,
            team_a: vec!["alice".into()],
            team_b: vec!["bob".into()],
            report: ScoreReport::PointScores(vec![SetScore::new(21, 19), SetScore::new(30, 29)]),
            reporter: "alice".into(),
            target: None,
            strategy: None,
            timestamp: current_timestamp(),
        })
        .await?;
    println!("reported {}", record.summary());
    state
        .engine
        .record_vote(record.id, &"bob".into(), VoteDecision::Approve)
        .await?;

    // Doubles with the guest filling a slot; one partner disputes
    let record = state
        .engine
        .create_match(MatchReport {
            mode: MatchMode::Doubles,
            team_a: vec!["carol".into(), "guest".into()],
            team_b: vec!["alice".into(), "bob".into()],
            report: ScoreReport::PointScores(vec![SetScore::new(21, 15), SetScore::new(21, 18)]),
            reporter: "carol".into(),
            target: None,
            strategy: None,
            timestamp: current_timestamp(),
        })
        .await?;
    println!("\nreported {}", record.summary());
    state
        .engine
        .record_vote(record.id, &"alice".into(), VoteDecision::Approve)
        .await?;
    state
        .engine
        .record_vote(record.id, &"bob".into(), VoteDecision::Reject)
        .await?;

    println!();
    print_leaderboard(&state)?;
    print_stats(&state);
    Ok(())
}

fn print_leaderboard(state: &AppState) -> Result<()> {
    println!("\n🏆 Leaderboard");
    for (rank, entry) in state.query.top_n(20)?.iter().enumerate() {
        println!(
            "{:>3}. {:<12} {:>6.0} ({}-{})",
            rank + 1,
            entry.player_id,
            entry.rating,
            entry.wins,
            entry.losses
        );
    }
    Ok(())
}

fn print_stats(state: &AppState) {
    let stats = state.engine.stats();
    println!(
        "\nmatches: {} created, {} verified, {} rejected | votes: {}",
        stats.matches_created, stats.matches_verified, stats.matches_rejected, stats.votes_recorded
    );
}
