//! Assistant insight endpoints.
//!
//! Failures here surface as `ai_service_error` so the caller can show that
//! analysis is unavailable rather than a generic failure.

use crate::api::dto::{AnalysisEnvelope, OwnerBody, RecommendationsEnvelope};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

/// `POST /ai/analyze`
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OwnerBody>, JsonRejection>,
) -> ApiResult<Json<AnalysisEnvelope>> {
    let Json(body) = payload?;
    let analysis = state.insights.analyze(body.owner()?).await?;
    Ok(Json(AnalysisEnvelope { analysis }))
}

/// `POST /ai/recommendations`
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OwnerBody>, JsonRejection>,
) -> ApiResult<Json<RecommendationsEnvelope>> {
    let Json(body) = payload?;
    let recommendations = state.insights.recommend(body.owner()?).await?;
    Ok(Json(RecommendationsEnvelope { recommendations }))
}
