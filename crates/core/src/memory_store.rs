//! In-process [`EventStore`] backed by a `Vec` of events.
//!
//! Used by the engine tests and by callers embedding the analytics without
//! a database. Grouping is a straight scan, so it is only suitable for small
//! data sets.

use std::collections::BTreeMap;

use chrono::{DurationRound, TimeDelta, Timelike};

use crate::aggregation::{AggregationError, EventStore, GroupBy, GroupKey, GroupRow};
use crate::error::CoreError;
use crate::event::{validate_new_event, NewEvent};
use crate::types::{EventCount, Timestamp};
use crate::window::TimeWindow;

/// Grouping key tuple: `(camera_id, event_type, hour_of_day, hour_bucket)`.
type RowKey = (Option<String>, Option<String>, Option<u32>, Option<Timestamp>);

#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Vec<NewEvent>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from events, validating each one.
    pub fn from_events<I>(events: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = NewEvent>,
    {
        let mut store = Self::new();
        for event in events {
            store.insert(event)?;
        }
        Ok(store)
    }

    pub fn insert(&mut self, event: NewEvent) -> Result<(), CoreError> {
        validate_new_event(&event)?;
        self.events.push(event);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn group(&self, window: &TimeWindow, group_by: GroupBy) -> Result<Vec<GroupRow>, AggregationError> {
        let mut groups: BTreeMap<RowKey, EventCount> = BTreeMap::new();

        for event in self.events.iter().filter(|e| window.contains(e.ts_utc)) {
            let hour_bucket = if group_by.contains(GroupKey::HourBucket) {
                let bucket = event
                    .ts_utc
                    .duration_trunc(TimeDelta::hours(1))
                    .map_err(|e| AggregationError::Store(e.to_string()))?;
                Some(bucket)
            } else {
                None
            };

            let key = (
                group_by
                    .contains(GroupKey::CameraId)
                    .then(|| event.camera_id.clone()),
                group_by
                    .contains(GroupKey::EventType)
                    .then(|| event.event_type.clone()),
                group_by
                    .contains(GroupKey::HourOfDay)
                    .then(|| event.ts_utc.hour()),
                hour_bucket,
            );
            *groups.entry(key).or_insert(0) += 1;
        }

        Ok(groups
            .into_iter()
            .map(|((camera_id, event_type, hour_of_day, hour_bucket), count)| GroupRow {
                camera_id,
                event_type,
                hour_of_day,
                hour_bucket,
                count,
            })
            .collect())
    }
}

impl EventStore for MemoryEventStore {
    async fn group_count(
        &self,
        window: &TimeWindow,
        group_by: GroupBy,
    ) -> Result<Vec<GroupRow>, AggregationError> {
        self.group(window, group_by)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
