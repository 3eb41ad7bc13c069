//! Application state shared across handlers

use auth::{PasswordScheme, TokenService, UserRepository};
use sqlx::PgPool;

use crate::repositories::{CharacterRepository, CommentRepository, EpisodeRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub token_service: TokenService,
    pub user_repository: UserRepository,
    pub episode_repository: EpisodeRepository,
    pub character_repository: CharacterRepository,
    pub comment_repository: CommentRepository,
}

impl AppState {
    /// Build every repository over one shared pool
    pub fn new(pool: PgPool, token_service: TokenService, scheme: PasswordScheme) -> Self {
        Self {
            user_repository: UserRepository::new(pool.clone(), scheme),
            episode_repository: EpisodeRepository::new(pool.clone()),
            character_repository: CharacterRepository::new(pool.clone()),
            comment_repository: CommentRepository::new(pool.clone()),
            token_service,
            db_pool: pool,
        }
    }
}
