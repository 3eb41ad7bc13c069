//! User repository: the credential store

use common::error::DatabaseError;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    error::{AuthError, AuthResult},
    models::{NewUser, PasswordUpdate, User},
    password::PasswordScheme,
    validation::{validate_password, validate_username},
};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
    scheme: PasswordScheme,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool, scheme: PasswordScheme) -> Self {
        Self { pool, scheme }
    }

    /// Create a new user
    ///
    /// Fails with `Conflict` when the username is taken and `InvalidInput`
    /// when the username or password is rejected by policy.
    pub async fn create(&self, new_user: &NewUser) -> AuthResult<User> {
        if self.find(&new_user.username).await?.is_some() {
            return Err(AuthError::Conflict(new_user.username.clone()));
        }

        validate_username(&new_user.username).map_err(AuthError::InvalidInput)?;
        validate_password(&new_user.password).map_err(AuthError::InvalidInput)?;

        let stored = self.scheme.encode(&new_user.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING username, password
            "#,
        )
        .bind(&new_user.username)
        .bind(&stored)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?
        .ok_or_else(|| AuthError::Conflict(new_user.username.clone()))?;

        info!("Created user: {}", user.username);
        Ok(user)
    }

    /// Find a user by username
    pub async fn find(&self, username: &str) -> AuthResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(user)
    }

    /// List all users ordered by username
    pub async fn list(&self) -> AuthResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(users)
    }

    /// Verify a username/password pair, returning the stored user
    ///
    /// Unknown usernames and wrong passwords both yield `AuthFailed`.
    pub async fn verify(&self, username: &str, password: &str) -> AuthResult<User> {
        let user = self.find(username).await?.ok_or(AuthError::AuthFailed)?;

        if self.credential_matches(&user, password) {
            Ok(user)
        } else {
            Err(AuthError::AuthFailed)
        }
    }

    /// Replace a user's password after checking the current one
    pub async fn update_password(
        &self,
        username: &str,
        update: &PasswordUpdate,
    ) -> AuthResult<User> {
        let user = self
            .find(username)
            .await?
            .ok_or_else(|| AuthError::NotFound(username.to_string()))?;

        validate_password(&update.new_password).map_err(AuthError::InvalidInput)?;

        if !self.credential_matches(&user, &update.password) {
            return Err(AuthError::AuthFailed);
        }

        let stored = self.scheme.encode(&update.new_password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET password = $2
            WHERE username = $1
            RETURNING username, password
            "#,
        )
        .bind(username)
        .bind(&stored)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?
        .ok_or_else(|| AuthError::NotFound(username.to_string()))?;

        info!("Updated password for user: {}", user.username);
        Ok(user)
    }

    /// Delete a user. Deleting an absent user is not an error.
    ///
    /// Returns whether a row was removed.
    pub async fn delete(&self, username: &str) -> AuthResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!("Deleted user: {}", username);
        }
        Ok(removed)
    }

    fn credential_matches(&self, user: &User, password: &str) -> bool {
        match self.scheme.matches(password, &user.password) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Stored credential for {} is unreadable: {}", user.username, e);
                false
            }
        }
    }
}
