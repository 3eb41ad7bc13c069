//! Shared helpers for the HTTP integration tests
#![allow(dead_code)]

use api::{
    AppState, create_router,
    importer::{self, CharacterRecord, EpisodeRecord},
};
use auth::{PasswordScheme, TokenConfig, TokenService, models::NewUser};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{PgPool, migrate::Migrator};
use tower::ServiceExt;

pub static MIGRATIONS: Migrator = sqlx::migrate!("../../libs/common/migrations");

pub const PASSWORD: &str = "Abcd1234*";

pub fn test_state(pool: PgPool) -> AppState {
    let tokens = TokenService::new(TokenConfig {
        secret: "api-test-secret".to_string(),
        access_token_ttl: chrono::Duration::minutes(30),
    });
    AppState::new(pool, tokens, PasswordScheme::Plaintext)
}

/// Router plus a token for a freshly created `username`
pub async fn app_with_user(pool: PgPool, username: &str) -> (Router, AppState, String) {
    let state = test_state(pool);
    state
        .user_repository
        .create(&NewUser {
            username: username.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    let token = state.token_service.issue_access_token(username).unwrap();
    (create_router(state.clone()), state, token)
}

pub fn episode(id: i32, characters: &[i32]) -> EpisodeRecord {
    EpisodeRecord {
        id: Some(id),
        name: Some(format!("Episode {}", id)),
        air_date: Some("December 2, 2013".to_string()),
        episode: Some(format!("S01E{:02}", id)),
        characters: Some(characters.to_vec()),
    }
}

pub fn character(id: i32, status: &str, episodes: &[i32]) -> CharacterRecord {
    CharacterRecord {
        id: Some(id),
        name: Some(format!("Character {}", id)),
        status: Some(status.to_string()),
        species: Some("Human".to_string()),
        kind: Some(String::new()),
        gender: Some("Male".to_string()),
        episode: Some(episodes.to_vec()),
    }
}

pub async fn seed(pool: &PgPool, episodes: &[EpisodeRecord], characters: &[CharacterRecord]) {
    importer::import(pool, episodes, characters).await.unwrap();
}

pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn with_json(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn call(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// Send a request and decode the JSON body (`Null` when empty)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = call(app, request).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
