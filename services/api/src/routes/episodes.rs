use axum::{Json, extract::State};

use crate::{error::ApiResult, models::Episode, state::AppState};

pub async fn list_episodes(State(state): State<AppState>) -> ApiResult<Json<Vec<Episode>>> {
    let episodes = state.episode_repository.list().await?;
    Ok(Json(episodes))
}
