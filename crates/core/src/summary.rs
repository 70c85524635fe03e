//! Plain grouped-count views (no classification, no scoring).

use serde::Serialize;

use crate::aggregation::{CameraCount, HourBucketCount, TypeCount};

/// Companion view to the risk report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Most frequent type first.
    pub by_type: Vec<TypeCount>,
    /// Busiest camera first.
    pub by_camera: Vec<CameraCount>,
    /// Calendar-hour buckets, oldest first.
    pub hourly_buckets: Vec<HourBucketCount>,
}

/// Order the three views. Count ties are broken by key so output is stable
/// regardless of the order the store returned groups in.
pub fn build_summary(
    mut by_type: Vec<TypeCount>,
    mut by_camera: Vec<CameraCount>,
    mut hourly_buckets: Vec<HourBucketCount>,
) -> Summary {
    by_type.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.event_type.cmp(&b.event_type)));
    by_camera.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.camera_id.cmp(&b.camera_id)));
    hourly_buckets.sort_by_key(|b| b.ts_hour);

    Summary {
        by_type,
        by_camera,
        hourly_buckets,
    }
}
