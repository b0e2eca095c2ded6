//! HTTP+JSON surface.
//!
//! Every route is stateless apart from the injected [`AppState`]; errors are
//! rendered as `{"error": {"kind", "message", "field"?}}` by
//! [`ApiError`].
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/health` | liveness |
//! | GET, POST | `/users` | lookup by email, register |
//! | GET, POST | `/tasks` | list, create |
//! | GET | `/tasks/stats` | summary figures |
//! | PUT, DELETE | `/tasks/{id}` | partial update, delete |
//! | POST | `/tasks/{id}/toggle` | checkbox toggle |
//! | GET, POST | `/context` | trailing window, capture |
//! | POST | `/ai/analyze` | workload analysis |
//! | POST | `/ai/recommendations` | task recommendations |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, SharedClock, Stores};

use axum::Router;
use axum::routing::{get, post, put};
use handlers::{context, insights, tasks, users};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router over `state`.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/users", get(users::find).post(users::register))
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route("/tasks/stats", get(tasks::stats))
        .route("/tasks/{id}", put(tasks::update).delete(tasks::delete))
        .route("/tasks/{id}/toggle", post(tasks::toggle))
        .route("/context", get(context::list).post(context::create))
        .route("/ai/analyze", post(insights::analyze))
        .route("/ai/recommendations", post(insights::recommendations))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}
