//! Service layer for the rally-ledger core
//!
//! This module contains the application state that wires configuration,
//! stores, the player registry, the verification engine, and the query
//! surface together.

pub mod app;

pub use app::AppState;
