use axum::{Json, extract::State};

use crate::{
    error::ApiResult,
    extract::ApiQuery,
    models::{Character, CharacterFilter},
    pagination::{Page, PageParams},
    state::AppState,
};

/// List characters matching every provided filter
pub async fn list_characters(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CharacterFilter>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Page<Character>>> {
    let page = state
        .character_repository
        .list(&filter, params.resolve()?)
        .await?;

    Ok(Json(page))
}
