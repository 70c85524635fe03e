//! Route definitions for event risk and temporal analytics.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Analytics routes mounted at `/analytics`.
///
/// ```text
/// GET /risk       -> get_risk
/// GET /matrix     -> get_temporal_matrix
/// GET /summary    -> get_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/risk", get(analytics::get_risk))
        .route("/matrix", get(analytics::get_temporal_matrix))
        .route("/summary", get(analytics::get_summary))
}
