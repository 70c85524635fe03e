//! Analysis window resolution.
//!
//! Turns a caller-supplied breadth in hours into a concrete half-open
//! `[since, until)` interval. The `hours` parameter is deliberately lenient:
//! missing, non-numeric, non-finite and non-positive values fall back to
//! [`DEFAULT_WINDOW_HOURS`] instead of failing the request. All arithmetic is
//! UTC.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Window breadth used when the caller supplies none (or an invalid one).
pub const DEFAULT_WINDOW_HOURS: f64 = 24.0;

/// Upper bound on the window breadth (ten years). Larger requests are clamped.
pub const MAX_WINDOW_HOURS: f64 = 87_600.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

// ---------------------------------------------------------------------------
// TimeWindow
// ---------------------------------------------------------------------------

/// A resolved half-open interval `[since, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    pub since: Timestamp,
    pub until: Timestamp,
    /// Effective breadth in hours after defaulting and clamping.
    pub hours: f64,
}

impl TimeWindow {
    /// The window of `hours` ending at `now`.
    ///
    /// `hours` is not defaulted or clamped; callers go through
    /// [`resolve_window`] for those rules. A zero, negative or NaN breadth
    /// yields an empty window at `now`, and a breadth too large to represent
    /// reaches back to the earliest timestamp.
    pub fn trailing(now: Timestamp, hours: f64) -> Self {
        let millis = hours * MILLIS_PER_HOUR;
        let since = if millis > 0.0 {
            TimeDelta::try_milliseconds(millis.round() as i64)
                .and_then(|span| now.checked_sub_signed(span))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        } else {
            now
        };
        Self {
            since,
            until: now,
            hours,
        }
    }

    /// Whether `ts` falls inside `[since, until)`.
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.since && ts < self.until
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Parse a raw `hours` query value. Anything unparseable is treated as absent.
pub fn parse_window_hours(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

/// Apply the defaulting and clamping rules to a requested breadth.
pub fn effective_hours(hours: Option<f64>) -> f64 {
    match hours {
        Some(h) if h.is_finite() && h > 0.0 => h.min(MAX_WINDOW_HOURS),
        _ => DEFAULT_WINDOW_HOURS,
    }
}

/// Resolve the trailing window ending at `now`.
pub fn resolve_window(now: Timestamp, hours: Option<f64>) -> TimeWindow {
    TimeWindow::trailing(now, effective_hours(hours))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
