//! Character model and list filters

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Character entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Character {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub gender: String,
    /// Ids of the episodes the character appears in
    #[sqlx(json)]
    pub episode: Vec<i32>,
}

/// Query parameters for character listing
///
/// Provided fields are combined with AND. String fields match exactly;
/// `episode_id` matches characters whose episode list contains it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterFilter {
    pub status: Option<String>,
    pub species: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub gender: Option<String>,
    pub episode_id: Option<i32>,
}
