//! Pass-through user management.
//!
//! Handlers forward the caller's `Authorization` header unchanged to the
//! user service. Upstream business failures come back with the upstream's
//! own code and message; transport and decode failures are internal errors.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{post, put};
use axum::{Json, Router};
use idgate_core::UserId;
use idgate_user_client::{CreateUserRequest, CreateUserResponse, UpdateUserRequest, UpdateUserResponse};

use crate::auth::{bearer_credential, AuthorizationContext};
use crate::error::AppError;
use crate::extractors::{extract_json, extract_path};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", put(update_user))
}

fn forwarded_credential<'a>(state: &AppState, headers: &'a HeaderMap) -> Result<&'a str, AppError> {
    bearer_credential(headers).map_err(|e| e.into_gateway(state.unauthorized_code()).into())
}

/// POST /users: create a user in the user service.
async fn create_user(
    State(state): State<AppState>,
    ctx: AuthorizationContext,
    headers: HeaderMap,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<CreateUserResponse> {
    let req = extract_json(body)?;
    let credential = forwarded_credential(&state, &headers)?;

    tracing::info!(caller = %ctx.identity().id(), login_name = %req.profile.login_name, "creating user");
    let resp = state.user_client.create_user(credential, &req).await?;
    Ok(ApiResponse(resp))
}

/// PUT /users/{id}: update a user in the user service.
async fn update_user(
    State(state): State<AppState>,
    ctx: AuthorizationContext,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<UpdateUserResponse> {
    let id = UserId(extract_path(id)?);
    let req = extract_json(body)?;
    let credential = forwarded_credential(&state, &headers)?;

    tracing::info!(caller = %ctx.identity().id(), user_id = %id, "updating user");
    let resp = state.user_client.update_user(credential, id, &req).await?;
    Ok(ApiResponse(resp))
}
