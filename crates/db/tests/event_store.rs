//! Integration tests for grouped event counts against a real database.
//!
//! Exercises `EventRepo` and `PgEventStore`:
//! - Insert round trip and check constraints
//! - Half-open window filtering
//! - Grouping by camera/type, UTC hour of day and calendar hour
//! - Empty windows yield no rows

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use vigil_core::aggregation::{
    project, CameraTypeCount, EventStore, GroupBy, HourBucketCount, HourTypeCount, TypeCount,
};
use vigil_core::event::NewEvent;
use vigil_core::types::Timestamp;
use vigil_core::window::{resolve_window, TimeWindow};
use vigil_db::repositories::EventRepo;
use vigil_db::PgEventStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at(day: u32, hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
}

async fn seed(pool: &PgPool, events: &[(Timestamp, &str, &str)]) {
    for (ts, camera, event_type) in events {
        EventRepo::insert(pool, &NewEvent::new(*ts, *camera, *event_type))
            .await
            .unwrap();
    }
}

fn window(since: Timestamp, until: Timestamp) -> TimeWindow {
    TimeWindow {
        since,
        until,
        hours: (until - since).num_minutes() as f64 / 60.0,
    }
}

// ---------------------------------------------------------------------------
// Test: insert round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_returns_stored_row(pool: PgPool) {
    let input = NewEvent::new(at(10, 8, 15), "cam1", "intrusion").in_zone("lobby");
    let event = EventRepo::insert(&pool, &input).await.unwrap();

    assert!(event.id > 0);
    assert_eq!(event.ts_utc, at(10, 8, 15));
    assert_eq!(event.camera_id, "cam1");
    assert_eq!(event.event_type, "intrusion");
    assert_eq!(event.zone.as_deref(), Some("lobby"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_rejects_blank_camera(pool: PgPool) {
    let input = NewEvent::new(at(10, 8, 15), "  ", "intrusion");
    let result = EventRepo::insert(&pool, &input).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

// ---------------------------------------------------------------------------
// Test: window filtering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_window_is_half_open(pool: PgPool) {
    seed(
        &pool,
        &[
            (at(10, 0, 0), "cam1", "fall"),
            (at(10, 5, 0), "cam1", "fall"),
            (at(10, 6, 0), "cam1", "fall"),
        ],
    )
    .await;

    let store = PgEventStore::new(pool);
    let rows = store
        .group_count(&window(at(10, 0, 0), at(10, 6, 0)), GroupBy::BY_TYPE)
        .await
        .unwrap();
    let counts: Vec<TypeCount> = project(rows).unwrap();

    assert_eq!(
        counts,
        vec![TypeCount {
            event_type: "fall".into(),
            count: 2,
        }]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trailing_window_excludes_old_events(pool: PgPool) {
    let now = at(10, 12, 0);
    seed(
        &pool,
        &[
            (at(10, 11, 0), "cam1", "intrusion"),
            (at(9, 11, 0), "cam1", "intrusion"),
        ],
    )
    .await;

    let store = PgEventStore::new(pool);
    let rows = store
        .group_count(&resolve_window(now, Some(2.0)), GroupBy::BY_TYPE)
        .await
        .unwrap();
    let counts: Vec<TypeCount> = project(rows).unwrap();

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].count, 1);
}

// ---------------------------------------------------------------------------
// Test: grouping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_by_camera_and_type(pool: PgPool) {
    seed(
        &pool,
        &[
            (at(10, 1, 0), "cam2", "fall"),
            (at(10, 2, 0), "cam1", "intrusion"),
            (at(10, 3, 0), "cam1", "intrusion"),
            (at(10, 4, 0), "cam1", "fall"),
        ],
    )
    .await;

    let store = PgEventStore::new(pool);
    let rows = store
        .group_count(&window(at(10, 0, 0), at(11, 0, 0)), GroupBy::BY_CAMERA_TYPE)
        .await
        .unwrap();
    let counts: Vec<CameraTypeCount> = project(rows).unwrap();

    let flat: Vec<_> = counts
        .iter()
        .map(|c| (c.camera_id.as_str(), c.event_type.as_str(), c.count))
        .collect();
    assert_eq!(
        flat,
        vec![("cam1", "fall", 1), ("cam1", "intrusion", 2), ("cam2", "fall", 1)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_by_utc_hour_of_day(pool: PgPool) {
    seed(
        &pool,
        &[
            (at(9, 14, 10), "cam1", "loitering"),
            (at(10, 14, 50), "cam2", "loitering"),
            (at(10, 3, 0), "cam1", "fall"),
        ],
    )
    .await;

    let store = PgEventStore::new(pool);
    let rows = store
        .group_count(&window(at(9, 0, 0), at(11, 0, 0)), GroupBy::BY_HOUR_TYPE)
        .await
        .unwrap();
    let counts: Vec<HourTypeCount> = project(rows).unwrap();

    let flat: Vec<_> = counts
        .iter()
        .map(|c| (c.hour, c.event_type.as_str(), c.count))
        .collect();
    assert_eq!(flat, vec![(3, "fall", 1), (14, "loitering", 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_by_calendar_hour(pool: PgPool) {
    seed(
        &pool,
        &[
            (at(10, 7, 5), "cam1", "fall"),
            (at(10, 7, 55), "cam1", "fall"),
            (at(10, 9, 30), "cam1", "fall"),
        ],
    )
    .await;

    let store = PgEventStore::new(pool);
    let rows = store
        .group_count(&window(at(10, 0, 0), at(11, 0, 0)), GroupBy::BY_HOUR_BUCKET)
        .await
        .unwrap();
    let buckets: Vec<HourBucketCount> = project(rows).unwrap();

    assert_eq!(
        buckets,
        vec![
            HourBucketCount {
                ts_hour: at(10, 7, 0),
                count: 2,
            },
            HourBucketCount {
                ts_hour: at(10, 9, 0),
                count: 1,
            },
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_total_count_without_keys(pool: PgPool) {
    seed(
        &pool,
        &[(at(10, 1, 0), "cam1", "fall"), (at(10, 2, 0), "cam2", "intrusion")],
    )
    .await;

    let store = PgEventStore::new(pool);
    let rows = store
        .group_count(&window(at(10, 0, 0), at(11, 0, 0)), GroupBy::none())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].count, 2);
    assert!(rows[0].camera_id.is_none());
    assert!(rows[0].event_type.is_none());
}

// ---------------------------------------------------------------------------
// Test: empty windows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_window_yields_no_rows(pool: PgPool) {
    let store = PgEventStore::new(pool);
    let range = window(at(10, 0, 0), at(11, 0, 0));

    for group_by in [
        GroupBy::none(),
        GroupBy::BY_TYPE,
        GroupBy::BY_CAMERA_TYPE,
        GroupBy::BY_HOUR_TYPE,
        GroupBy::BY_HOUR_BUCKET,
    ] {
        let rows = store.group_count(&range, group_by).await.unwrap();
        assert!(rows.is_empty(), "expected no rows for {group_by}");
    }
}

// ---------------------------------------------------------------------------
// Test: store failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_closed_pool_surfaces_store_error(pool: PgPool) {
    let store = PgEventStore::new(pool);
    store.pool().close().await;

    let result = store
        .group_count(&window(at(10, 0, 0), at(11, 0, 0)), GroupBy::BY_TYPE)
        .await;
    assert_matches!(
        result,
        Err(vigil_core::aggregation::AggregationError::Store(_))
    );
}
