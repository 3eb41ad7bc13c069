//! Comment handlers
//!
//! The author of a new comment is always the authenticated user. Listings
//! scoped to an episode and/or character answer 404 when that scope does not
//! exist, before any comment is read.

use axum::{Extension, Json, extract::State, http::StatusCode};
use common::error::DatabaseError;

use crate::{
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath, ApiQuery},
    integrity::IntegrityChecker,
    middleware::AuthUser,
    models::{Comment, CommentCreated, CommentFilter, CommentPayload, NewComment},
    pagination::{Page, PageParams},
    state::AppState,
};

fn comment_text(payload: CommentPayload) -> ApiResult<String> {
    if payload.comment.trim().is_empty() {
        return Err(ApiError::Validation("Comment text must not be empty.".to_string()));
    }
    Ok(payload.comment)
}

fn comment_not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("Comment id {} not found.", id))
}

async fn create(
    state: &AppState,
    user: AuthUser,
    episode_id: Option<i32>,
    character_id: Option<i32>,
    payload: CommentPayload,
) -> ApiResult<(StatusCode, Json<CommentCreated>)> {
    let new_comment = NewComment {
        username: user.username,
        episode_id,
        character_id,
        comment: comment_text(payload)?,
    };

    let id = state.comment_repository.create(&new_comment).await?;
    Ok((StatusCode::CREATED, Json(CommentCreated { id })))
}

async fn list_scoped(
    state: &AppState,
    mut filter: CommentFilter,
    params: PageParams,
    episode_id: Option<i32>,
    character_id: Option<i32>,
) -> ApiResult<Json<Page<Comment>>> {
    let request = params.resolve()?;

    let mut conn = state
        .db_pool
        .acquire()
        .await
        .map_err(DatabaseError::Connection)?;
    IntegrityChecker::require_target(&mut *conn, episode_id, character_id).await?;
    drop(conn);

    filter.episode_id = episode_id;
    filter.character_id = character_id;

    let page = state.comment_repository.list(&filter, request).await?;
    Ok(Json(page))
}

pub async fn create_episode_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(episode_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> ApiResult<(StatusCode, Json<CommentCreated>)> {
    create(&state, user, Some(episode_id), None, payload).await
}

pub async fn create_character_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(character_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> ApiResult<(StatusCode, Json<CommentCreated>)> {
    create(&state, user, None, Some(character_id), payload).await
}

/// Comment on a character's appearance in an episode
pub async fn create_episode_character_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((episode_id, character_id)): ApiPath<(i32, i32)>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> ApiResult<(StatusCode, Json<CommentCreated>)> {
    create(&state, user, Some(episode_id), Some(character_id), payload).await
}

pub async fn list_comments(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CommentFilter>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Comment>>> {
    let page = state
        .comment_repository
        .list(&filter, params.resolve()?)
        .await?;

    Ok(Json(page))
}

pub async fn list_episode_comments(
    State(state): State<AppState>,
    ApiPath(episode_id): ApiPath<i32>,
    ApiQuery(filter): ApiQuery<CommentFilter>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Comment>>> {
    list_scoped(&state, filter, params, Some(episode_id), None).await
}

pub async fn list_character_comments(
    State(state): State<AppState>,
    ApiPath(character_id): ApiPath<i32>,
    ApiQuery(filter): ApiQuery<CommentFilter>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Comment>>> {
    list_scoped(&state, filter, params, None, Some(character_id)).await
}

pub async fn list_episode_character_comments(
    State(state): State<AppState>,
    ApiPath((episode_id, character_id)): ApiPath<(i32, i32)>,
    ApiQuery(filter): ApiQuery<CommentFilter>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Comment>>> {
    list_scoped(&state, filter, params, Some(episode_id), Some(character_id)).await
}

pub async fn get_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Comment>> {
    let comment = state
        .comment_repository
        .get(id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    Ok(Json(comment))
}

pub async fn update_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> ApiResult<Json<Comment>> {
    let text = comment_text(payload)?;

    let comment = state
        .comment_repository
        .update(id, &text)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    Ok(Json(comment))
}

/// Delete a comment; deleting an absent comment also succeeds
pub async fn delete_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    state.comment_repository.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
