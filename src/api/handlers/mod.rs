//! Request handlers, one module per resource.

pub mod context;
pub mod insights;
pub mod tasks;
pub mod users;

use super::dto::HealthResponse;
use axum::Json;

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
