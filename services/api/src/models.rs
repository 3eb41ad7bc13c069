//! API models for request and response payloads

use serde::Serialize;

pub mod character;
pub mod comment;
pub mod episode;

pub use character::{Character, CharacterFilter};
pub use comment::{Comment, CommentCreated, CommentFilter, CommentPayload, NewComment};
pub use episode::Episode;

/// Response for token generation
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap an access token in the `bearer` envelope
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Response for user operations
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
}

impl From<auth::models::User> for UserResponse {
    fn from(user: auth::models::User) -> Self {
        Self {
            username: user.username,
        }
    }
}
