//! Stored-credential schemes
//!
//! `Plaintext` keeps the password as typed and compares it byte-for-byte.
//! This is the legacy behavior of the user table and stays the default so
//! existing rows keep verifying. `Argon2` stores a salted Argon2id PHC string
//! instead. Switching schemes does not migrate existing rows.

use std::str::FromStr;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

use crate::error::{AuthError, AuthResult};

/// How passwords are written to and compared against the `users` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// Store as-is, compare byte-for-byte
    #[default]
    Plaintext,
    /// Store an Argon2id PHC hash with a random salt
    Argon2,
}

impl PasswordScheme {
    /// Read the scheme from `AUTH_PASSWORD_SCHEME` (default: `plaintext`)
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var("AUTH_PASSWORD_SCHEME") {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Encode a password for storage
    pub fn encode(&self, password: &str) -> AuthResult<String> {
        match self {
            PasswordScheme::Plaintext => Ok(password.to_string()),
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut rand::thread_rng());
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| AuthError::Hashing(e.to_string()))?;
                Ok(hash.to_string())
            }
        }
    }

    /// Check a candidate password against a stored value
    pub fn matches(&self, password: &str, stored: &str) -> AuthResult<bool> {
        match self {
            PasswordScheme::Plaintext => Ok(password.as_bytes() == stored.as_bytes()),
            PasswordScheme::Argon2 => {
                let parsed = PasswordHash::new(stored).map_err(|e| {
                    AuthError::Hashing(format!("Failed to parse password hash: {e}"))
                })?;
                match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(AuthError::Hashing(e.to_string())),
                }
            }
        }
    }
}

impl FromStr for PasswordScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plaintext" => Ok(PasswordScheme::Plaintext),
            "argon2" => Ok(PasswordScheme::Argon2),
            other => Err(anyhow::anyhow!(
                "Unknown AUTH_PASSWORD_SCHEME '{other}' (expected 'plaintext' or 'argon2')"
            )),
        }
    }
}
