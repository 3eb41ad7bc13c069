//! Episode repository

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;

use crate::models::Episode;

/// Episode repository
#[derive(Clone)]
pub struct EpisodeRepository {
    pool: PgPool,
}

impl EpisodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All episodes ordered by id
    pub async fn list(&self) -> DatabaseResult<Vec<Episode>> {
        let episodes = sqlx::query_as::<_, Episode>(
            r#"
            SELECT id, name, air_date, episode, characters
            FROM episodes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(episodes)
    }
}
