// ============================
// crates/backend-lib/src/handlers/health.rs
// ============================
//! Liveness endpoint.
use axum::{response::IntoResponse, Json};

/// Handler for `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}
