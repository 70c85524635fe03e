//! Request-level analytics over an [`EventStore`].
//!
//! Each operation resolves its window, fans out the independent grouped-count
//! queries concurrently and assembles the response once all of them have
//! completed. The first failing query fails the whole request and the
//! remaining in-flight queries are dropped; nothing partial is returned.
//! Dropping the returned future cancels every outstanding query.
//!
//! Sub-queries are not required to observe one consistent snapshot of the
//! store. Skew between them under concurrent writes is accepted.

use crate::aggregation::{
    project, AggregationError, CameraCount, CameraTypeCount, EventStore, GroupBy, GroupRow,
    HourBucketCount, HourTypeCount, TypeCount,
};
use crate::risk::{RiskReport, RiskScorer};
use crate::summary::{build_summary, Summary};
use crate::temporal_matrix::{build_temporal_matrix, TemporalMatrix};
use crate::types::Timestamp;
use crate::window::{resolve_window, TimeWindow};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fixed breadth of the time-of-day matrix.
pub const MATRIX_WINDOW_HOURS: f64 = 24.0;

/// Breadth of the by-type and by-camera summary views.
pub const SUMMARY_WINDOW_HOURS: f64 = 24.0;

/// Breadth of the summary's hourly bucket view.
pub const SUMMARY_HOURLY_WINDOW_HOURS: f64 = 12.0;

// ---------------------------------------------------------------------------
// AnalyticsEngine
// ---------------------------------------------------------------------------

/// Stateless query front-end. Every call recomputes from the store.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine<S> {
    store: S,
    scorer: RiskScorer,
}

impl<S: EventStore> AnalyticsEngine<S> {
    pub fn new(store: S, scorer: RiskScorer) -> Self {
        Self { store, scorer }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    async fn fetch<T>(&self, window: &TimeWindow, group_by: GroupBy) -> Result<Vec<T>, AggregationError>
    where
        T: TryFrom<GroupRow, Error = AggregationError>,
    {
        let rows = self.store.group_count(window, group_by).await?;
        project(rows)
    }

    /// Severity pie and per-camera risk ranking over the trailing `hours`.
    ///
    /// `hours` follows the window resolver's lenient rules: absent or invalid
    /// values mean 24.
    pub async fn risk(&self, now: Timestamp, hours: Option<f64>) -> Result<RiskReport, AggregationError> {
        let window = resolve_window(now, hours);

        let (by_type, by_camera_type) = tokio::try_join!(
            self.fetch::<TypeCount>(&window, GroupBy::BY_TYPE),
            self.fetch::<CameraTypeCount>(&window, GroupBy::BY_CAMERA_TYPE),
        )?;

        Ok(self.scorer.score(&by_type, &by_camera_type, window.hours))
    }

    /// Hour-of-day x event-type matrix over the trailing 24 hours.
    pub async fn temporal_matrix(&self, now: Timestamp) -> Result<TemporalMatrix, AggregationError> {
        let window = TimeWindow::trailing(now, MATRIX_WINDOW_HOURS);
        let groups = self
            .fetch::<HourTypeCount>(&window, GroupBy::BY_HOUR_TYPE)
            .await?;
        Ok(build_temporal_matrix(&groups))
    }

    /// Counts by type and camera over the last day, plus hourly buckets over
    /// the last 12 hours.
    pub async fn summary(&self, now: Timestamp) -> Result<Summary, AggregationError> {
        let day = TimeWindow::trailing(now, SUMMARY_WINDOW_HOURS);
        let recent = TimeWindow::trailing(now, SUMMARY_HOURLY_WINDOW_HOURS);

        let (by_type, by_camera, hourly_buckets) = tokio::try_join!(
            self.fetch::<TypeCount>(&day, GroupBy::BY_TYPE),
            self.fetch::<CameraCount>(&day, GroupBy::BY_CAMERA),
            self.fetch::<HourBucketCount>(&recent, GroupBy::BY_HOUR_BUCKET),
        )?;

        Ok(build_summary(by_type, by_camera, hourly_buckets))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
