//! Referential checks run before comments are written
//!
//! Every check is a single query against a borrowed connection, so callers
//! can run them inside their own transaction. Matching rows are locked
//! `FOR SHARE` until that transaction ends.

use common::error::DatabaseError;
use sqlx::PgConnection;
use thiserror::Error;

/// A relationship a comment depends on does not hold
#[derive(Error, Debug)]
pub enum IntegrityError {
    #[error("Episode id {0} not found.")]
    EpisodeNotFound(i32),

    #[error("Character id {0} not found.")]
    CharacterNotFound(i32),

    #[error("Character id {character_id} is not in episode id {episode_id}.")]
    CharacterNotInEpisode { character_id: i32, episode_id: i32 },

    #[error("User {0} not found.")]
    UserNotFound(String),

    #[error("A comment must reference an episode or a character.")]
    MissingTarget,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type IntegrityResult<T> = Result<T, IntegrityError>;

/// Existence and membership checks over episodes, characters and users
pub struct IntegrityChecker;

impl IntegrityChecker {
    pub async fn episode_exists(conn: &mut PgConnection, id: i32) -> IntegrityResult<bool> {
        let row = sqlx::query_scalar::<_, i32>("SELECT id FROM episodes WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.is_some())
    }

    pub async fn character_exists(conn: &mut PgConnection, id: i32) -> IntegrityResult<bool> {
        let row =
            sqlx::query_scalar::<_, i32>("SELECT id FROM characters WHERE id = $1 FOR SHARE")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(DatabaseError::Query)?;

        Ok(row.is_some())
    }

    /// True iff the episode exists and lists the character
    pub async fn character_in_episode(
        conn: &mut PgConnection,
        character_id: i32,
        episode_id: i32,
    ) -> IntegrityResult<bool> {
        let row = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT id
            FROM episodes
            WHERE id = $1 AND characters @> jsonb_build_array($2::int)
            FOR SHARE
            "#,
        )
        .bind(episode_id)
        .bind(character_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.is_some())
    }

    pub async fn user_exists(conn: &mut PgConnection, username: &str) -> IntegrityResult<bool> {
        let row = sqlx::query_scalar::<_, String>(
            "SELECT username FROM users WHERE username = $1 FOR SHARE",
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.is_some())
    }

    pub async fn require_episode(conn: &mut PgConnection, id: i32) -> IntegrityResult<()> {
        if Self::episode_exists(conn, id).await? {
            Ok(())
        } else {
            Err(IntegrityError::EpisodeNotFound(id))
        }
    }

    pub async fn require_character(conn: &mut PgConnection, id: i32) -> IntegrityResult<()> {
        if Self::character_exists(conn, id).await? {
            Ok(())
        } else {
            Err(IntegrityError::CharacterNotFound(id))
        }
    }

    pub async fn require_membership(
        conn: &mut PgConnection,
        character_id: i32,
        episode_id: i32,
    ) -> IntegrityResult<()> {
        if Self::character_in_episode(conn, character_id, episode_id).await? {
            Ok(())
        } else {
            Err(IntegrityError::CharacterNotInEpisode {
                character_id,
                episode_id,
            })
        }
    }

    pub async fn require_user(conn: &mut PgConnection, username: &str) -> IntegrityResult<()> {
        if Self::user_exists(conn, username).await? {
            Ok(())
        } else {
            Err(IntegrityError::UserNotFound(username.to_string()))
        }
    }

    /// Check the episode and/or character a comment points at
    ///
    /// With both ids the episode is checked first, then membership, then the
    /// character row itself.
    pub async fn require_target(
        conn: &mut PgConnection,
        episode_id: Option<i32>,
        character_id: Option<i32>,
    ) -> IntegrityResult<()> {
        match (episode_id, character_id) {
            (Some(episode_id), Some(character_id)) => {
                Self::require_episode(conn, episode_id).await?;
                Self::require_membership(conn, character_id, episode_id).await?;
                Self::require_character(conn, character_id).await
            }
            (Some(episode_id), None) => Self::require_episode(conn, episode_id).await,
            (None, Some(character_id)) => Self::require_character(conn, character_id).await,
            (None, None) => Err(IntegrityError::MissingTarget),
        }
    }
}
