//! User model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity
///
/// `password` holds the stored credential in whatever form the configured
/// [`PasswordScheme`](crate::password::PasswordScheme) writes. It is never
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// New user creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Password change payload
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordUpdate {
    /// Current password
    pub password: String,
    pub new_password: String,
}

/// User login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}
