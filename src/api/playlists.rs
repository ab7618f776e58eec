use axum::{Json, extract::State};
use serde_json::Value;

use super::{AccessToken, AppState};
use crate::error::RelayError;

/// Answers with every playlist item at once, or with the first failing
/// page's error. Never both, never more than one response.
pub async fn get_playlists(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Result<Json<Vec<Value>>, RelayError> {
    let items = state.spotify.list_all_playlists(&token).await?;
    Ok(Json(items))
}
