//! User endpoints.

use crate::api::dto::{CreateUserBody, UserEnvelope, UserQuery, UserResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use std::sync::Arc;

/// `GET /users?email=`
pub async fn find(
    State(state): State<Arc<AppState>>,
    params: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<UserEnvelope>> {
    let Query(query) = params?;
    let email = query.email.ok_or_else(|| ApiError::missing("email"))?;
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no user with email address {email}")))?;
    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}

/// `POST /users`
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserEnvelope>)> {
    let Json(body) = payload?;
    let user = state.users.register(body.into_request()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            user: UserResponse::from(&user),
        }),
    ))
}
