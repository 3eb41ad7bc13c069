//! Authentication middleware for bearer token validation

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Authentication middleware
///
/// Resolves the bearer token to an existing user and stores it in the
/// request extensions as [`AuthUser`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let TypedHeader(Authorization(bearer)) =
        bearer.ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let user = state
        .token_service
        .validate(bearer.token(), &state.user_repository)
        .await?;

    req.extensions_mut().insert(AuthUser {
        username: user.username,
    });

    Ok(next.run(req).await)
}
