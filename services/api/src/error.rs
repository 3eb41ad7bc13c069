//! Custom error types for the API service

use auth::AuthError;
use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::integrity::IntegrityError;

/// Custom error type for the API service
///
/// Every variant carries the human-readable message returned to the client
/// as `{"detail": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or policy-violating input (400)
    #[error("{0}")]
    Validation(String),

    /// Missing/invalid credentials or token (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Resource absent or relationship violated (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate resource (409)
    #[error("{0}")]
    Conflict(String),

    /// Database or other backend failure (500)
    #[error("Error while fetching records: {0}")]
    Backend(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Backend(_) = &self {
            error!("{}", self);
        }

        let body = Json(json!({
            "detail": self.to_string(),
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Backend(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Conflict(_) => ApiError::Conflict(err.to_string()),
            AuthError::InvalidInput(msg) => ApiError::Validation(msg),
            AuthError::AuthFailed | AuthError::Unauthorized => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AuthError::Database(db) => db.into(),
            AuthError::Hashing(_) | AuthError::TokenEncoding(_) => {
                ApiError::Backend(err.to_string())
            }
        }
    }
}

impl From<IntegrityError> for ApiError {
    fn from(err: IntegrityError) -> Self {
        match err {
            IntegrityError::MissingTarget => ApiError::Validation(err.to_string()),
            IntegrityError::Database(db) => db.into(),
            IntegrityError::EpisodeNotFound(_)
            | IntegrityError::CharacterNotFound(_)
            | IntegrityError::CharacterNotInEpisode { .. }
            | IntegrityError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
