use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vigil_core::aggregation::AggregationError;

/// Application-level error type for HTTP handlers.
///
/// Every analytics endpoint is a read-only query whose inputs never fail
/// validation, so the only request-time failure is the event store.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A grouped-count query failed or returned malformed rows.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Cause is logged only.
            AppError::Aggregation(err) => {
                tracing::error!(error = %err, "Event aggregation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AGGREGATION_FAILED",
                    "Event aggregation failed",
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
