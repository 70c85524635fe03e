//! Repository for the `events` table.

use sqlx::PgPool;
use vigil_core::aggregation::{GroupBy, GroupKey};
use vigil_core::event::NewEvent;
use vigil_core::window::TimeWindow;

use crate::models::event::{Event, GroupCountRow};

/// Column list for `events` queries.
const COLUMNS: &str = "id, ts_utc, camera_id, event_type, zone, created_at";

/// Provides insert and grouped-count access to events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the stored row.
    ///
    /// Blank `camera_id` / `event_type` values are rejected by check constraints.
    pub async fn insert(pool: &PgPool, input: &NewEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (ts_utc, camera_id, event_type, zone) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(input.ts_utc)
            .bind(&input.camera_id)
            .bind(&input.event_type)
            .bind(&input.zone)
            .fetch_one(pool)
            .await
    }

    /// Count events with `since <= ts_utc < until`, grouped by `group_by`.
    ///
    /// Groups are ordered by their keys. An empty match yields no rows, also
    /// when `group_by` is empty.
    pub async fn group_count(
        pool: &PgPool,
        window: &TimeWindow,
        group_by: GroupBy,
    ) -> Result<Vec<GroupCountRow>, sqlx::Error> {
        let query = group_count_query(group_by);
        sqlx::query_as::<_, GroupCountRow>(&query)
            .bind(window.since)
            .bind(window.until)
            .fetch_all(pool)
            .await
    }
}

/// Select expression for a key, grouped or not. Positions in the select list
/// follow [`GroupKey::ALL`], so the key at index `i` is output column `i + 1`.
fn key_column(key: GroupKey, grouped: bool) -> &'static str {
    match (key, grouped) {
        (GroupKey::CameraId, true) => "camera_id",
        (GroupKey::CameraId, false) => "NULL::TEXT AS camera_id",
        (GroupKey::EventType, true) => "event_type",
        (GroupKey::EventType, false) => "NULL::TEXT AS event_type",
        (GroupKey::HourOfDay, true) => {
            "EXTRACT(HOUR FROM ts_utc AT TIME ZONE 'UTC')::INT AS hour_of_day"
        }
        (GroupKey::HourOfDay, false) => "NULL::INT AS hour_of_day",
        (GroupKey::HourBucket, true) => {
            "date_trunc('hour', ts_utc AT TIME ZONE 'UTC') AT TIME ZONE 'UTC' AS hour_bucket"
        }
        (GroupKey::HourBucket, false) => "NULL::TIMESTAMPTZ AS hour_bucket",
    }
}

fn group_count_query(group_by: GroupBy) -> String {
    let select: Vec<&str> = GroupKey::ALL
        .iter()
        .map(|&k| key_column(k, group_by.contains(k)))
        .collect();

    let positions: Vec<String> = GroupKey::ALL
        .iter()
        .enumerate()
        .filter(|(_, k)| group_by.contains(**k))
        .map(|(i, _)| (i + 1).to_string())
        .collect();

    let mut query = format!(
        "SELECT {}, COUNT(*) AS count FROM events \
         WHERE ts_utc >= $1 AND ts_utc < $2",
        select.join(", ")
    );
    if positions.is_empty() {
        // An aggregate without GROUP BY always returns one row.
        query.push_str(" HAVING COUNT(*) > 0");
        return query;
    }

    let positions = positions.join(", ");
    query.push_str(&format!(
        " GROUP BY {positions} HAVING COUNT(*) > 0 ORDER BY {positions}"
    ));
    query
}
