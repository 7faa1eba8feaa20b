//! Utility functions for the match ledger

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique rating snapshot ID
pub fn generate_snapshot_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Mean of a slice of values; `default` when the slice is empty
pub fn mean_or(values: &[f64], default: f64) -> f64 {
    if values.is_empty() {
        return default;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round a value to the given number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
