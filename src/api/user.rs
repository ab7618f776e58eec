use axum::extract::State;

use super::{AccessToken, AppState};
use crate::{error::RelayError, types::UpstreamBody};

pub async fn get_user(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Result<UpstreamBody, RelayError> {
    state.spotify.current_user(&token).await
}
