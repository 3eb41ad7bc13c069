//! Start-up configuration for the API binary

use anyhow::Result;
use auth::{PasswordScheme, TokenConfig};
use common::database::DatabaseConfig;
use config::{Config, Environment};
use serde::Deserialize;
use std::env;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// HTTP listener settings (`SERVER_HOST`, `SERVER_PORT`)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(Environment::with_prefix("SERVER").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Account created at start-up when `ADMIN_USERNAME` and `ADMIN_PASSWORD` are set
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn from_env() -> Option<Self> {
        let username = env::var("ADMIN_USERNAME").ok().filter(|v| !v.is_empty())?;
        let password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty())?;
        Some(Self { username, password })
    }
}

/// Everything the API binary reads from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub password_scheme: PasswordScheme,
    pub admin: Option<AdminCredentials>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            token: TokenConfig::from_env()?,
            password_scheme: PasswordScheme::from_env()?,
            admin: AdminCredentials::from_env(),
        })
    }
}
