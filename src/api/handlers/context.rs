//! Context journal endpoints.

use crate::api::dto::{
    ContextEntriesEnvelope, ContextEntryEnvelope, ContextEntryResponse, ContextQuery,
    CreateContextBody,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use std::sync::Arc;

/// `GET /context?userId=&days=`
pub async fn list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ContextQuery>, QueryRejection>,
) -> ApiResult<Json<ContextEntriesEnvelope>> {
    let Query(query) = params?;
    let (user_id, window) = query.into_parts()?;
    let entries = state.journal.list_recent(user_id, window).await?;
    Ok(Json(ContextEntriesEnvelope {
        context_entries: entries.iter().map(ContextEntryResponse::from).collect(),
    }))
}

/// `POST /context`
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateContextBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContextEntryEnvelope>)> {
    let Json(body) = payload?;
    let entry = state.journal.record(body.into_request()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContextEntryEnvelope {
            context_entry: ContextEntryResponse::from(&entry),
        }),
    ))
}
