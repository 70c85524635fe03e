use std::sync::Arc;

use vigil_core::analytics::AnalyticsEngine;
use vigil_core::error::CoreError;
use vigil_core::risk::RiskScorer;
use vigil_core::severity::{SeverityTable, WeightTable};
use vigil_db::{DbPool, PgEventStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Analytics engine reading from the `events` table.
    pub engine: Arc<AnalyticsEngine<PgEventStore>>,
}

impl AppState {
    /// Build state from a pool and configuration.
    ///
    /// Fails if `config.severity_overrides` is malformed.
    pub fn new(pool: DbPool, config: ServerConfig) -> Result<Self, CoreError> {
        let severity = SeverityTable::default().with_overrides(&config.severity_overrides)?;
        let scorer = RiskScorer::new(severity, WeightTable::default());
        let engine = AnalyticsEngine::new(PgEventStore::new(pool.clone()), scorer);

        Ok(Self {
            pool,
            config: Arc::new(config),
            engine: Arc::new(engine),
        })
    }
}
