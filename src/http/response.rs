//! Response helpers shared by API handlers.
//!
//! Every error body has the same shape: `{"message": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// JSON error body with the given status.
pub fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Fallback for paths no route matched.
pub async fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found")
}
