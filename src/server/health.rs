use axum::{response::IntoResponse, Json};
use http::StatusCode;
use serde_json::json;

/// Liveness check for load balancers and uptime monitors.
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
