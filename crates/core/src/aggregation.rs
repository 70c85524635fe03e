//! Event store collaborator boundary.
//!
//! The analytics engine never sees individual events, only grouped counts.
//! [`EventStore::group_count`] is the single primitive it needs: count the
//! events inside a [`TimeWindow`] grouped by a subset of [`GroupKey`]s. The
//! typed count structs below are projections of the generic [`GroupRow`].

use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::types::{EventCount, Timestamp};
use crate::window::TimeWindow;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure at the event store boundary.
///
/// Never retried inside the engine; the whole request fails with it.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// The store could not execute the grouping query.
    #[error("Event store query failed: {0}")]
    Store(String),

    /// The store returned a row without one of the requested keys.
    #[error("Event store returned a row without the requested {0} key")]
    MissingKey(GroupKey),

    /// The store returned an hour-of-day outside `0..=23`.
    #[error("Event store returned hour_of_day {0}, expected 0..=23")]
    HourOutOfRange(u32),
}

// ---------------------------------------------------------------------------
// Grouping keys
// ---------------------------------------------------------------------------

/// A dimension events can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    CameraId,
    EventType,
    /// UTC hour of day, `0..=23`.
    HourOfDay,
    /// UTC timestamp truncated to the hour.
    HourBucket,
}

impl GroupKey {
    pub const ALL: [GroupKey; 4] = [
        GroupKey::CameraId,
        GroupKey::EventType,
        GroupKey::HourOfDay,
        GroupKey::HourBucket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::CameraId => "camera_id",
            GroupKey::EventType => "event_type",
            GroupKey::HourOfDay => "hour_of_day",
            GroupKey::HourBucket => "hour_bucket",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [`GroupKey`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupBy {
    camera_id: bool,
    event_type: bool,
    hour_of_day: bool,
    hour_bucket: bool,
}

impl GroupBy {
    pub const BY_TYPE: GroupBy = GroupBy::none().with(GroupKey::EventType);
    pub const BY_CAMERA: GroupBy = GroupBy::none().with(GroupKey::CameraId);
    pub const BY_CAMERA_TYPE: GroupBy = GroupBy::BY_CAMERA.with(GroupKey::EventType);
    pub const BY_HOUR_TYPE: GroupBy = GroupBy::BY_TYPE.with(GroupKey::HourOfDay);
    pub const BY_HOUR_BUCKET: GroupBy = GroupBy::none().with(GroupKey::HourBucket);

    /// The empty set: a single total count.
    pub const fn none() -> Self {
        Self {
            camera_id: false,
            event_type: false,
            hour_of_day: false,
            hour_bucket: false,
        }
    }

    pub const fn with(mut self, key: GroupKey) -> Self {
        match key {
            GroupKey::CameraId => self.camera_id = true,
            GroupKey::EventType => self.event_type = true,
            GroupKey::HourOfDay => self.hour_of_day = true,
            GroupKey::HourBucket => self.hour_bucket = true,
        }
        self
    }

    pub fn contains(&self, key: GroupKey) -> bool {
        match key {
            GroupKey::CameraId => self.camera_id,
            GroupKey::EventType => self.event_type,
            GroupKey::HourOfDay => self.hour_of_day,
            GroupKey::HourBucket => self.hour_bucket,
        }
    }

    /// Keys in the set, in [`GroupKey::ALL`] order.
    pub fn keys(&self) -> impl Iterator<Item = GroupKey> + '_ {
        GroupKey::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.keys().map(|k| k.as_str()).collect();
        if keys.is_empty() {
            f.write_str("(total)")
        } else {
            f.write_str(&keys.join(","))
        }
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One group returned by [`EventStore::group_count`].
///
/// Exactly the keys requested in the [`GroupBy`] are populated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupRow {
    pub camera_id: Option<String>,
    pub event_type: Option<String>,
    pub hour_of_day: Option<u32>,
    pub hour_bucket: Option<Timestamp>,
    pub count: EventCount,
}

/// Events grouped by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub event_type: String,
    pub count: EventCount,
}

/// Events grouped by camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraCount {
    pub camera_id: String,
    pub count: EventCount,
}

/// Events grouped by the (camera, type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraTypeCount {
    pub camera_id: String,
    pub event_type: String,
    pub count: EventCount,
}

/// Events grouped by UTC hour of day and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourTypeCount {
    pub hour: u32,
    pub event_type: String,
    pub count: EventCount,
}

/// Events grouped by calendar hour (`YYYY-MM-DD HH:00` UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucketCount {
    pub ts_hour: Timestamp,
    pub count: EventCount,
}

fn require<T>(value: Option<T>, key: GroupKey) -> Result<T, AggregationError> {
    value.ok_or(AggregationError::MissingKey(key))
}

impl TryFrom<GroupRow> for TypeCount {
    type Error = AggregationError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        Ok(Self {
            event_type: require(row.event_type, GroupKey::EventType)?,
            count: row.count,
        })
    }
}

impl TryFrom<GroupRow> for CameraCount {
    type Error = AggregationError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        Ok(Self {
            camera_id: require(row.camera_id, GroupKey::CameraId)?,
            count: row.count,
        })
    }
}

impl TryFrom<GroupRow> for CameraTypeCount {
    type Error = AggregationError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        Ok(Self {
            camera_id: require(row.camera_id, GroupKey::CameraId)?,
            event_type: require(row.event_type, GroupKey::EventType)?,
            count: row.count,
        })
    }
}

impl TryFrom<GroupRow> for HourTypeCount {
    type Error = AggregationError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        let hour = require(row.hour_of_day, GroupKey::HourOfDay)?;
        if hour >= crate::temporal_matrix::HOURS_PER_DAY {
            return Err(AggregationError::HourOutOfRange(hour));
        }
        Ok(Self {
            hour,
            event_type: require(row.event_type, GroupKey::EventType)?,
            count: row.count,
        })
    }
}

impl TryFrom<GroupRow> for HourBucketCount {
    type Error = AggregationError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        Ok(Self {
            ts_hour: require(row.hour_bucket, GroupKey::HourBucket)?,
            count: row.count,
        })
    }
}

/// Convert raw rows into a typed projection, failing on the first malformed row.
pub fn project<T>(rows: Vec<GroupRow>) -> Result<Vec<T>, AggregationError>
where
    T: TryFrom<GroupRow, Error = AggregationError>,
{
    rows.into_iter().map(T::try_from).collect()
}

// ---------------------------------------------------------------------------
// EventStore
// ---------------------------------------------------------------------------

/// Read-only grouped-count access to stored events.
///
/// Implementations must return an empty list (not an error, not a zero-count
/// row) when nothing matches, and must only count events whose timestamp
/// lies in the half-open window. Timeouts are the implementation's concern.
pub trait EventStore: Send + Sync {
    fn group_count(
        &self,
        window: &TimeWindow,
        group_by: GroupBy,
    ) -> impl Future<Output = Result<Vec<GroupRow>, AggregationError>> + Send;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
