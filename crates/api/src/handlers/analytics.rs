//! Handlers for event risk and temporal analytics.
//!
//! All three are read-only and recompute from the event store on every
//! request. The request time is taken once per request and shared by every
//! sub-query the engine issues.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use vigil_core::window::parse_window_hours;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// First `hours` value of the query string, unparsed.
///
/// The query is taken as raw pairs so that neither a non-numeric value nor a
/// repeated key can be rejected by the extractor; both fall back to the
/// default window.
fn raw_hours(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "hours")
        .map(|(_, value)| value.as_str())
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

/// GET /api/v1/analytics/risk?hours=
///
/// Severity pie and per-camera risk ranking over the trailing `hours`
/// (default 24).
pub async fn get_risk(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let raw = raw_hours(&pairs);
    let hours = parse_window_hours(raw);
    if raw.is_some() && hours.is_none() {
        tracing::debug!(raw = ?raw, "Ignoring unparseable hours, using default window");
    }

    let report = state.engine.risk(Utc::now(), hours).await?;
    tracing::debug!(
        window_hours = report.window_hours,
        cameras = report.risk_by_camera.len(),
        "Computed risk report"
    );
    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Temporal matrix
// ---------------------------------------------------------------------------

/// GET /api/v1/analytics/matrix
///
/// Hour-of-day x event-type counts over the trailing 24 hours. Always 24 rows.
pub async fn get_temporal_matrix(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let matrix = state.engine.temporal_matrix(Utc::now()).await?;
    Ok(Json(DataResponse { data: matrix }))
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// GET /api/v1/analytics/summary
///
/// Counts by type and by camera over the trailing 24 hours, plus calendar-hour
/// buckets over the trailing 12 hours.
pub async fn get_summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summary = state.engine.summary(Utc::now()).await?;
    Ok(Json(DataResponse { data: summary }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn raw_hours_takes_the_first_value() {
        let query = pairs(&[("hours", "6"), ("hours", "2")]);
        assert_eq!(raw_hours(&query), Some("6"));
    }

    #[test]
    fn raw_hours_ignores_other_keys() {
        assert_eq!(raw_hours(&pairs(&[("camera", "cam1")])), None);
        assert_eq!(raw_hours(&[]), None);
    }
}
