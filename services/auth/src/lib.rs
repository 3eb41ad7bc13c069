//! Authentication for the Rick & Morty API
//!
//! Provides the credential store ([`UserRepository`]), the password policy
//! and storage schemes, and the bearer token service ([`TokenService`]).

pub mod error;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use jwt::{Claims, TokenConfig, TokenService};
pub use password::PasswordScheme;
pub use repositories::UserRepository;
