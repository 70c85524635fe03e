//! Severity distribution and per-camera risk ranking.
//!
//! Risk is relative, not absolute: each camera's weighted score is rescaled
//! so the busiest camera in the window maps to exactly 100.

use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregation::{CameraTypeCount, TypeCount};
use crate::severity::{SeverityTable, SeverityTier, WeightTable};
use crate::types::EventCount;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Normalised risk of the highest-scoring camera.
pub const MAX_RISK: u32 = 100;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One slice of the severity pie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityCount {
    pub severity: SeverityTier,
    pub count: EventCount,
}

/// A camera's weighted score and its normalised risk in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskEntry {
    pub camera_id: String,
    pub raw: i64,
    pub risk: u32,
}

/// Full response of a risk query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub severity_pie: Vec<SeverityCount>,
    pub risk_by_camera: Vec<RiskEntry>,
    /// Weights used to compute `raw`, echoed for auditability.
    pub weights: WeightTable,
    pub window_hours: f64,
}

// ---------------------------------------------------------------------------
// RiskScorer
// ---------------------------------------------------------------------------

/// Pure scoring over grouped counts. Owns its classification and weights.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    severity: SeverityTable,
    weights: WeightTable,
}

impl RiskScorer {
    pub fn new(severity: SeverityTable, weights: WeightTable) -> Self {
        Self { severity, weights }
    }

    pub fn severity_table(&self) -> &SeverityTable {
        &self.severity
    }

    pub fn weights(&self) -> WeightTable {
        self.weights
    }

    /// Weight of a single event of `event_type`.
    pub fn event_weight(&self, event_type: &str) -> i64 {
        self.weights.weight(self.severity.classify(event_type))
    }

    /// Count events per tier. Tiers with no events are omitted; the rest are
    /// emitted in `low`, `medium`, `high` order.
    pub fn severity_distribution(&self, by_type: &[TypeCount]) -> Vec<SeverityCount> {
        let mut totals = [0 as EventCount; SeverityTier::ALL.len()];
        for row in by_type.iter().filter(|r| r.count > 0) {
            totals[self.severity.classify(&row.event_type).index()] += row.count;
        }

        SeverityTier::ALL
            .into_iter()
            .zip(totals)
            .filter(|&(_, count)| count > 0)
            .map(|(severity, count)| SeverityCount { severity, count })
            .collect()
    }

    /// Sum `weight(tier(type)) * count` per camera, in discovery order.
    ///
    /// Cameras only appear once they contribute at least one event.
    pub fn weighted_totals(&self, by_camera_type: &[CameraTypeCount]) -> IndexMap<String, i64> {
        let mut totals: IndexMap<String, i64> = IndexMap::new();
        for row in by_camera_type.iter().filter(|r| r.count > 0) {
            let weighted = self.event_weight(&row.event_type) * row.count;
            *totals.entry(row.camera_id.clone()).or_insert(0) += weighted;
        }
        totals
    }

    /// Score both views and assemble the report.
    pub fn score(
        &self,
        by_type: &[TypeCount],
        by_camera_type: &[CameraTypeCount],
        window_hours: f64,
    ) -> RiskReport {
        RiskReport {
            severity_pie: self.severity_distribution(by_type),
            risk_by_camera: rank_cameras(self.weighted_totals(by_camera_type)),
            weights: self.weights,
            window_hours,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Rescale `raw` against `max` to `[0, 100]`, rounding half up.
///
/// A non-positive `max` is treated as 1.
pub fn normalize_risk(raw: i64, max: i64) -> u32 {
    let max = i128::from(max.max(1));
    let raw = i128::from(raw.clamp(0, i64::MAX));
    let scaled = (2 * i128::from(MAX_RISK) * raw + max) / (2 * max);
    scaled.min(i128::from(MAX_RISK)) as u32
}

/// Turn weighted totals into a ranking sorted by risk, descending.
///
/// The sort is stable, so cameras with equal risk keep discovery order.
pub fn rank_cameras(totals: IndexMap<String, i64>) -> Vec<RiskEntry> {
    let max = totals.values().copied().max().unwrap_or(1);

    let mut entries: Vec<RiskEntry> = totals
        .into_iter()
        .map(|(camera_id, raw)| RiskEntry {
            risk: normalize_risk(raw, max),
            camera_id,
            raw,
        })
        .collect();

    entries.sort_by(|a, b| b.risk.cmp(&a.risk));
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
