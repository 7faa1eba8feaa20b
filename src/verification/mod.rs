//! Multi-party verification of reported matches
//!
//! This module owns the per-match consensus state machine: matches are
//! created pending, accumulate approve/reject votes from their required
//! approvers, and transition exactly once to verified or rejected. The
//! verified transition triggers the rating engine exactly once.

pub mod engine;

// Re-export commonly used types
pub use engine::{EngineStats, VerificationEngine, VoteOutcome};
