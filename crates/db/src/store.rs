//! PostgreSQL-backed [`EventStore`].

use vigil_core::aggregation::{AggregationError, EventStore, GroupBy, GroupRow};
use vigil_core::window::TimeWindow;

use crate::repositories::EventRepo;
use crate::DbPool;

/// Serves grouped counts straight from the `events` table.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl EventStore for PgEventStore {
    async fn group_count(
        &self,
        window: &TimeWindow,
        group_by: GroupBy,
    ) -> Result<Vec<GroupRow>, AggregationError> {
        let rows = EventRepo::group_count(&self.pool, window, group_by)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    group_by = %group_by,
                    since = %window.since,
                    until = %window.until,
                    "Grouped event count failed"
                );
                AggregationError::Store(e.to_string())
            })?;

        tracing::debug!(group_by = %group_by, groups = rows.len(), "Grouped event count");

        rows.into_iter().map(|row| row.into_group_row()).collect()
    }
}
