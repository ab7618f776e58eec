use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use super::{AccessToken, AppState, extract::CONTEXT_URI_HEADER};
use crate::{
    error::RelayError,
    types::{DeviceParams, ShuffleParams},
};

/// `GET /play` starts playback of the optional `context-uri` header.
pub async fn play(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Query(params): Query<DeviceParams>,
    headers: HeaderMap,
) -> Result<Response, RelayError> {
    let context_uri = headers
        .get(CONTEXT_URI_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    let status = state
        .spotify
        .play(&token, context_uri, params.device_id.as_deref())
        .await?;

    Ok(status_response(status))
}

/// `PUT /shuffle` turns shuffle on, or off with `state=false`.
pub async fn shuffle(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Query(params): Query<ShuffleParams>,
) -> Result<Response, RelayError> {
    let status = state
        .spotify
        .shuffle(
            &token,
            params.state.unwrap_or(true),
            params.device_id.as_deref(),
        )
        .await?;

    Ok(status_response(status))
}

/// Mirrors the provider's status; the body repeats it as a JSON integer
/// except for 204, which carries no body.
fn status_response(status: StatusCode) -> Response {
    if status == StatusCode::NO_CONTENT {
        status.into_response()
    } else {
        (status, Json(status.as_u16())).into_response()
    }
}
