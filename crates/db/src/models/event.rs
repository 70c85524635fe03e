//! Event entity model and grouped-count row.

use serde::Serialize;
use sqlx::FromRow;
use vigil_core::aggregation::{AggregationError, GroupRow};
use vigil_core::types::{DbId, EventCount, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub ts_utc: Timestamp,
    pub camera_id: String,
    pub event_type: String,
    pub zone: Option<String>,
    pub created_at: Timestamp,
}

/// One group produced by [`EventRepo::group_count`](crate::repositories::EventRepo::group_count).
///
/// Columns for keys that were not grouped on come back as `NULL`.
#[derive(Debug, Clone, FromRow)]
pub struct GroupCountRow {
    pub camera_id: Option<String>,
    pub event_type: Option<String>,
    pub hour_of_day: Option<i32>,
    pub hour_bucket: Option<Timestamp>,
    pub count: EventCount,
}

impl GroupCountRow {
    pub fn into_group_row(self) -> Result<GroupRow, AggregationError> {
        let hour_of_day = self
            .hour_of_day
            .map(|h| {
                u32::try_from(h)
                    .map_err(|_| AggregationError::Store(format!("negative hour_of_day {h}")))
            })
            .transpose()?;

        Ok(GroupRow {
            camera_id: self.camera_id,
            event_type: self.event_type,
            hour_of_day,
            hour_bucket: self.hour_bucket,
            count: self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn row(hour_of_day: Option<i32>) -> GroupCountRow {
        GroupCountRow {
            camera_id: None,
            event_type: Some("fall".into()),
            hour_of_day,
            hour_bucket: None,
            count: 3,
        }
    }

    #[test]
    fn converts_to_group_row() {
        let group = row(Some(14)).into_group_row().unwrap();
        assert_eq!(group.event_type.as_deref(), Some("fall"));
        assert_eq!(group.hour_of_day, Some(14));
        assert_eq!(group.count, 3);
    }

    #[test]
    fn rejects_negative_hour() {
        assert_matches!(row(Some(-1)).into_group_row(), Err(AggregationError::Store(_)));
    }
}
