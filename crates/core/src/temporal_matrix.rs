//! Time-of-day matrix construction.
//!
//! Folds sparse `(hour, type, count)` groups into a dense 24-row table. Every
//! row carries every event type seen anywhere in the input, zero-filled where
//! the store returned no group. Hours are UTC.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::aggregation::HourTypeCount;
use crate::types::EventCount;

/// Rows in a [`TemporalMatrix`].
pub const HOURS_PER_DAY: u32 = 24;

/// Counts for one hour of the day, keyed by event type (lexicographic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub hour: u32,
    pub counts: BTreeMap<String, EventCount>,
}

impl MatrixRow {
    /// Count for `event_type`, `None` if the type is not a matrix column.
    pub fn get(&self, event_type: &str) -> Option<EventCount> {
        self.counts.get(event_type).copied()
    }

    pub fn total(&self) -> EventCount {
        self.counts.values().sum()
    }
}

/// Dense hour-of-day x event-type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalMatrix {
    /// Column set, sorted lexicographically.
    pub types: Vec<String>,
    /// Exactly [`HOURS_PER_DAY`] rows, hour 0 first.
    pub matrix: Vec<MatrixRow>,
}

impl TemporalMatrix {
    pub fn row(&self, hour: u32) -> Option<&MatrixRow> {
        self.matrix.get(hour as usize)
    }

    /// Sum of every cell.
    pub fn total(&self) -> EventCount {
        self.matrix.iter().map(MatrixRow::total).sum()
    }
}

/// Build the dense matrix.
///
/// Repeated `(hour, type)` groups are summed so the matrix total always equals
/// the input total. Groups with a non-positive count or an hour outside
/// `0..24` are ignored and contribute no column; the store projection rejects
/// bad hours before they get here.
pub fn build_temporal_matrix(by_hour_type: &[HourTypeCount]) -> TemporalMatrix {
    let counted: Vec<&HourTypeCount> = by_hour_type
        .iter()
        .filter(|g| g.count > 0 && g.hour < HOURS_PER_DAY)
        .collect();

    let types: BTreeSet<&str> = counted.iter().map(|g| g.event_type.as_str()).collect();

    let empty_row: BTreeMap<String, EventCount> =
        types.iter().map(|t| (t.to_string(), 0)).collect();

    let mut matrix: Vec<MatrixRow> = (0..HOURS_PER_DAY)
        .map(|hour| MatrixRow {
            hour,
            counts: empty_row.clone(),
        })
        .collect();

    for group in counted {
        if let Some(cell) = matrix[group.hour as usize].counts.get_mut(&group.event_type) {
            *cell += group.count;
        }
    }

    TemporalMatrix {
        types: types.into_iter().map(str::to_string).collect(),
        matrix,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
