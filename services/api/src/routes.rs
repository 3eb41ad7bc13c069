//! API service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{middleware::auth_middleware, state::AppState};

pub mod characters;
pub mod comments;
pub mod episodes;
pub mod token;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/episodes", get(episodes::list_episodes))
        .route("/characters", get(characters::list_characters))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:username",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/comments", get(comments::list_comments))
        .route(
            "/comments/episodes/:episode_id",
            get(comments::list_episode_comments).post(comments::create_episode_comment),
        )
        .route(
            "/comments/episodes/:episode_id/:character_id",
            get(comments::list_episode_character_comments)
                .post(comments::create_episode_character_comment),
        )
        .route(
            "/comments/characters/:character_id",
            get(comments::list_character_comments).post(comments::create_character_comment),
        )
        .route(
            "/comments/:id",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/token", post(token::issue_token))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match common::database::health_check(&state.db_pool).await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "api-service",
                "database": "up"
            })),
        ),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "service": "api-service",
                "database": "down"
            })),
        ),
    }
}
