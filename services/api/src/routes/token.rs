//! Token issuance

use auth::models::LoginCredentials;
use axum::{Json, extract::State};
use tracing::info;

use crate::{error::ApiResult, extract::ApiForm, models::TokenResponse, state::AppState};

/// Exchange form credentials for a bearer token
pub async fn issue_token(
    State(state): State<AppState>,
    ApiForm(credentials): ApiForm<LoginCredentials>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .user_repository
        .verify(&credentials.username, &credentials.password)
        .await?;

    let token = state.token_service.issue_access_token(&user.username)?;
    info!("Issued access token for {}", user.username);

    Ok(Json(TokenResponse::bearer(token)))
}
