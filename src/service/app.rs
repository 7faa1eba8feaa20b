//! Main application state and component wiring

use crate::config::AppConfig;
use crate::error::Result;
use crate::notify::Notifier;
use crate::player::PlayerRegistry;
use crate::query::QueryService;
use crate::store::{
    MatchStore, MemoryMatchStore, MemoryPlayerStore, MemorySnapshotStore, PlayerStore,
    SnapshotStore,
};
use crate::verification::VerificationEngine;
use std::sync::Arc;
use tracing::info;

/// Assembled application state
///
/// Owns one verification engine and one query surface over a shared set of
/// stores. A deployment with real persistence constructs this with its own
/// store implementations; tests and the demo binary use the in-memory ones.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: Arc<VerificationEngine>,
    pub registry: Arc<PlayerRegistry>,
    pub query: QueryService,
}

impl AppState {
    /// Wire the core over explicit store implementations
    pub fn new(
        config: AppConfig,
        players: Arc<dyn PlayerStore>,
        matches: Arc<dyn MatchStore>,
        snapshots: Arc<dyn SnapshotStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        crate::config::validate_config(&config)?;

        let registry = Arc::new(PlayerRegistry::new(
            players.clone(),
            snapshots.clone(),
            config.rating.clone(),
        )?);
        let engine = Arc::new(VerificationEngine::new(
            matches.clone(),
            registry.clone(),
            notifier,
            config.scoring.clone(),
            config.rating.clone(),
        ));
        let query = QueryService::new(players, matches, snapshots, config.rating.clone());

        info!(
            "Initialized {} (strategy: {}, target: {})",
            config.service.name, config.rating.strategy, config.scoring.target_default
        );

        Ok(Self {
            config,
            engine,
            registry,
            query,
        })
    }

    /// Wire the core over fresh in-memory stores
    pub fn in_memory(config: AppConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::new(
            config,
            Arc::new(MemoryPlayerStore::new()),
            Arc::new(MemoryMatchStore::new()),
            Arc::new(MemorySnapshotStore::new()),
            notifier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NullNotifier;

    #[test]
    fn test_in_memory_wiring() {
        let state = AppState::in_memory(AppConfig::default(), Arc::new(NullNotifier)).unwrap();

        // Guest singleton is seeded during wiring
        let guest = state.query.rating_of(&"guest".to_string()).unwrap();
        assert!(guest.is_some());
        assert_eq!(state.query.top_n(10).unwrap().len(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.rating.k_factor = -5.0;
        assert!(AppState::in_memory(config, Arc::new(NullNotifier)).is_err());
    }
}
