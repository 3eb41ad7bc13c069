//! JWT service for bearer token issuance and validation
//!
//! Tokens are HS256-signed with a server secret and carry the username as
//! subject plus an absolute expiry. The service holds no mutable state, so
//! one instance is cloned into every request handler.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::{AuthError, AuthResult},
    models::User,
    repositories::UserRepository,
};

/// Default access token lifetime in minutes.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret used to sign and verify tokens
    pub secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required, non-empty)
    /// - `JWT_ACCESS_TOKEN_EXPIRY_MINUTES`: Access token lifetime (default: 30)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        if secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let minutes: i64 = match std::env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES") {
            Ok(value) => value.parse().map_err(|e| {
                anyhow::anyhow!("JWT_ACCESS_TOKEN_EXPIRY_MINUTES must be an integer: {}", e)
            })?,
            Err(_) => DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES,
        };

        if minutes <= 0 {
            anyhow::bail!("JWT_ACCESS_TOKEN_EXPIRY_MINUTES must be positive");
        }

        let Some(access_token_ttl) = Duration::try_minutes(minutes) else {
            anyhow::bail!("JWT_ACCESS_TOKEN_EXPIRY_MINUTES is out of range: {}", minutes);
        };

        Ok(TokenConfig {
            secret,
            access_token_ttl,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated user
    pub sub: String,
    /// Issued at time (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Unique token identifier
    pub jti: Uuid,
}

/// JWT service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: TokenConfig,
}

impl TokenService {
    /// Initialize a new token service
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        TokenService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Issue a token for `subject` expiring `ttl` from now
    pub fn issue(&self, subject: &str, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl.num_seconds(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        debug!(subject, exp = claims.exp, "Issued token");
        Ok(token)
    }

    /// Issue a token with the configured access token lifetime
    pub fn issue_access_token(&self, subject: &str) -> AuthResult<String> {
        self.issue(subject, self.config.access_token_ttl)
    }

    /// Check signature, structure and expiry, returning the claims
    pub fn decode(&self, token: &str) -> AuthResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Rejected token: {}", e);
                AuthError::Unauthorized
            })?;
        Ok(token_data.claims)
    }

    /// Validate a token and resolve its subject to an existing user
    pub async fn validate(&self, token: &str, users: &UserRepository) -> AuthResult<User> {
        let claims = self.decode(token)?;

        match users.find(&claims.sub).await? {
            Some(user) => Ok(user),
            None => {
                info!("Token subject {} no longer exists", claims.sub);
                Err(AuthError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_service(secret: &str) -> TokenService {
        TokenService::new(TokenConfig {
            secret: secret.to_string(),
            access_token_ttl: Duration::minutes(DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES),
        })
    }

    #[test]
    fn test_issue_then_decode_returns_subject() {
        let service = test_service("test-secret-that-is-long-enough-for-hmac");
        let token = service.issue_access_token("rick").unwrap();

        let claims = service.decode(&token).unwrap();
        assert_eq!(claims.sub, "rick");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_service("test-secret-that-is-long-enough-for-hmac");
        let token = service.issue("rick", Duration::seconds(-5)).unwrap();

        assert!(matches!(service.decode(&token), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = test_service("secret-alpha");
        let verifier = test_service("secret-bravo");
        let token = issuer.issue_access_token("morty").unwrap();

        assert!(matches!(verifier.decode(&token), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let service = test_service("secret");
        assert!(matches!(service.decode("not.a.jwt"), Err(AuthError::Unauthorized)));
        assert!(matches!(service.decode(""), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let service = test_service("secret");
        let a = service.issue_access_token("summer").unwrap();
        let b = service.issue_access_token("summer").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    #[serial]
    fn test_token_config_from_env() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES");
        }
        assert!(TokenConfig::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_SECRET", "s3cret");
        }
        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.access_token_ttl, Duration::minutes(30));

        unsafe {
            std::env::set_var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES", "5");
        }
        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.access_token_ttl, Duration::minutes(5));

        unsafe {
            std::env::set_var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES", "0");
        }
        assert!(TokenConfig::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES", i64::MAX.to_string());
        }
        assert!(TokenConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES");
        }
    }
}
