//! Task endpoints.

use crate::api::dto::{
    CreateTaskBody, DeletedResponse, StatsEnvelope, TaskEnvelope, TaskListEnvelope, TaskQuery,
    TaskResponse, UpdateTaskBody,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::task::domain::{Task, TaskId};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use mockable::Clock;
use std::sync::Arc;

fn envelope(state: &AppState, task: &Task) -> Json<TaskEnvelope> {
    Json(TaskEnvelope {
        task: TaskResponse::from_task(task, state.clock.utc()),
    })
}

fn task_id(params: Result<Path<i64>, PathRejection>) -> ApiResult<TaskId> {
    let Path(raw) = params?;
    Ok(TaskId::new(raw)?)
}

/// `GET /tasks?userId=` with optional `status`, `priority`, `deadlineFrom`,
/// `deadlineTo`, `isOverdue`, `hasAISuggestions` and `search` filters.
pub async fn list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TaskQuery>, QueryRejection>,
) -> ApiResult<Json<TaskListEnvelope>> {
    let Query(query) = params?;
    let tasks = state
        .tasks
        .list(query.owner()?, &query.filter()?)
        .await?;
    let now = state.clock.utc();
    Ok(Json(TaskListEnvelope {
        tasks: tasks
            .iter()
            .map(|task| TaskResponse::from_task(task, now))
            .collect(),
    }))
}

/// `POST /tasks`
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskEnvelope>)> {
    let Json(body) = payload?;
    let task = state.tasks.create(body.into_request()?).await?;
    Ok((StatusCode::CREATED, envelope(&state, &task)))
}

/// `PUT /tasks/{id}`
pub async fn update(
    State(state): State<Arc<AppState>>,
    params: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<Json<TaskEnvelope>> {
    let id = task_id(params)?;
    let Json(body) = payload?;
    let task = state.tasks.update(id, body.into_patch()?).await?;
    Ok(envelope(&state, &task))
}

/// `POST /tasks/{id}/toggle`
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    params: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TaskEnvelope>> {
    let task = state.tasks.toggle(task_id(params)?).await?;
    Ok(envelope(&state, &task))
}

/// `DELETE /tasks/{id}`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    params: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    state.tasks.delete(task_id(params)?).await?;
    Ok(Json(DeletedResponse { success: true }))
}

/// `GET /tasks/stats?userId=`
pub async fn stats(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TaskQuery>, QueryRejection>,
) -> ApiResult<Json<StatsEnvelope>> {
    let Query(query) = params?;
    let stats = state.tasks.stats(query.owner()?).await?;
    Ok(Json(StatsEnvelope { stats }))
}
