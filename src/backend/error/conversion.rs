/**
 * Error Conversion
 *
 * Turns backend errors into HTTP responses so handlers can return them
 * directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, message);
        } else {
            tracing::warn!("Request rejected with {}: {}", status, message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Not Found")
}
