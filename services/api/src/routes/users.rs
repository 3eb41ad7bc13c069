//! User management handlers

use auth::{
    AuthError,
    models::{NewUser, PasswordUpdate},
};
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath},
    models::UserResponse,
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_repository.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_repository.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_repository
        .find(&username)
        .await?
        .ok_or_else(|| AuthError::NotFound(username.clone()))?;

    Ok(Json(user.into()))
}

/// Change a password; the current one must be supplied
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
    ApiJson(update): ApiJson<PasswordUpdate>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_repository
        .update_password(&username, &update)
        .await?;

    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<StatusCode> {
    state.user_repository.delete(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}
