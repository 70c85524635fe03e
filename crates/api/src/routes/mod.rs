pub mod analytics;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /analytics/risk                 severity pie + per-camera risk (?hours=)
/// /analytics/matrix               24h hour-of-day x event-type matrix
/// /analytics/summary              by type, by camera, hourly buckets
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/analytics", analytics::router())
}
