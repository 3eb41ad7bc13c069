//! Character repository

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    models::{Character, CharacterFilter},
    pagination::{Page, PageRequest},
};

/// Character repository
#[derive(Clone)]
pub struct CharacterRepository {
    pool: PgPool,
}

impl CharacterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered page of characters ordered by id
    pub async fn list(
        &self,
        filter: &CharacterFilter,
        request: PageRequest,
    ) -> DatabaseResult<Page<Character>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM characters");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        let mut select = QueryBuilder::<Postgres>::new(
            r#"SELECT id, name, status, species, "type", gender, episode FROM characters"#,
        );
        push_filters(&mut select, filter);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(request.limit())
            .push(" OFFSET ")
            .push_bind(request.offset());

        let items = select
            .build_query_as::<Character>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(Page::new(items, total, request))
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &CharacterFilter) {
    qb.push(" WHERE TRUE");

    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status.clone());
    }
    if let Some(species) = &filter.species {
        qb.push(" AND species = ").push_bind(species.clone());
    }
    if let Some(kind) = &filter.kind {
        qb.push(r#" AND "type" = "#).push_bind(kind.clone());
    }
    if let Some(gender) = &filter.gender {
        qb.push(" AND gender = ").push_bind(gender.clone());
    }
    if let Some(episode_id) = filter.episode_id {
        qb.push(" AND episode @> jsonb_build_array(")
            .push_bind(episode_id)
            .push("::int)");
    }
}
