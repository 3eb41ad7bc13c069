//! Comment repository

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use crate::{
    integrity::{IntegrityChecker, IntegrityResult},
    models::{Comment, CommentFilter, NewComment},
    pagination::{Page, PageRequest},
};

/// Comment repository
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment after checking what it refers to
    ///
    /// The checks and the insert share one transaction; the rows the checks
    /// read stay locked until it commits.
    pub async fn create(&self, new_comment: &NewComment) -> IntegrityResult<i32> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::Query)?;

        IntegrityChecker::require_user(&mut *tx, &new_comment.username).await?;
        IntegrityChecker::require_target(
            &mut *tx,
            new_comment.episode_id,
            new_comment.character_id,
        )
        .await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO comments (username, episode_id, character_id, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&new_comment.username)
        .bind(new_comment.episode_id)
        .bind(new_comment.character_id)
        .bind(&new_comment.comment)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::Query)?;

        tx.commit().await.map_err(DatabaseError::Query)?;

        info!("Created comment {} by {}", id, new_comment.username);
        Ok(id)
    }

    /// Find a comment by id
    pub async fn get(&self, id: i32) -> DatabaseResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, username, episode_id, character_id, comment
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(comment)
    }

    /// Filtered page of comments ordered by id
    pub async fn list(
        &self,
        filter: &CommentFilter,
        request: PageRequest,
    ) -> DatabaseResult<Page<Comment>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM comments");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        let mut select = QueryBuilder::<Postgres>::new(
            "SELECT id, username, episode_id, character_id, comment FROM comments",
        );
        push_filters(&mut select, filter);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(request.limit())
            .push(" OFFSET ")
            .push_bind(request.offset());

        let items = select
            .build_query_as::<Comment>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(Page::new(items, total, request))
    }

    /// Replace the text of a comment, returning the updated record if it exists
    pub async fn update(&self, id: i32, text: &str) -> DatabaseResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET comment = $2
            WHERE id = $1
            RETURNING id, username, episode_id, character_id, comment
            "#,
        )
        .bind(id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        if comment.is_some() {
            info!("Updated comment {}", id);
        }
        Ok(comment)
    }

    /// Delete a comment; returns whether a row was removed
    pub async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &CommentFilter) {
    qb.push(" WHERE TRUE");

    if let Some(username) = &filter.username {
        qb.push(" AND username = ").push_bind(username.clone());
    }
    if let Some(episode_id) = filter.episode_id {
        qb.push(" AND episode_id = ").push_bind(episode_id);
    }
    if let Some(character_id) = filter.character_id {
        qb.push(" AND character_id = ").push_bind(character_id);
    }
}
