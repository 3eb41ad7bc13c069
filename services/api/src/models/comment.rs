//! Comment model and payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Comment entity
///
/// At least one of `episode_id` / `character_id` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i32,
    pub username: String,
    pub episode_id: Option<i32>,
    pub character_id: Option<i32>,
    pub comment: String,
}

/// Comment to insert
#[derive(Debug, Clone)]
pub struct NewComment {
    pub username: String,
    pub episode_id: Option<i32>,
    pub character_id: Option<i32>,
    pub comment: String,
}

/// Request body for comment creation and update
#[derive(Debug, Clone, Deserialize)]
pub struct CommentPayload {
    pub comment: String,
}

/// Response for comment creation
#[derive(Debug, Serialize)]
pub struct CommentCreated {
    pub id: i32,
}

/// Filters for comment listing, combined with AND
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentFilter {
    pub username: Option<String>,
    #[serde(skip)]
    pub episode_id: Option<i32>,
    #[serde(skip)]
    pub character_id: Option<i32>,
}
