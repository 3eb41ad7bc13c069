//! Episode model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Episode entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Episode {
    pub id: i32,
    pub name: String,
    pub air_date: String,
    /// Episode code, e.g. `S01E01`
    pub episode: String,
    /// Ids of the characters appearing in the episode
    #[sqlx(json)]
    pub characters: Vec<i32>,
}
