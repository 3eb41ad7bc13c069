//! Error type for credential and token operations

use common::error::DatabaseError;
use thiserror::Error;

/// Failures raised by the credential store and the token service
#[derive(Error, Debug)]
pub enum AuthError {
    /// A user with this username already exists
    #[error("Username {0} already exists.")]
    Conflict(String),

    /// Username or password rejected by policy
    #[error("{0}")]
    InvalidInput(String),

    /// Username unknown or password mismatch
    #[error("Incorrect username or password")]
    AuthFailed,

    /// No user with this username
    #[error("User {0} not found.")]
    NotFound(String),

    /// Bearer token missing, malformed, expired, badly signed, or its subject is gone
    #[error("Could not validate credentials")]
    Unauthorized,

    /// Password encoding failed
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Token could not be signed
    #[error("Token encoding error: {0}")]
    TokenEncoding(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Type alias for Result with AuthError
pub type AuthResult<T> = Result<T, AuthError>;
