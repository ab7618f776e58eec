use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::{AppState, Payload};
use crate::{
    error::RelayError,
    types::{CallbackParams, LoginParams, RefreshParams, TokenResponse},
    utils,
};

/// `GET /login?redirect=<uri>` redirects (302) to the Spotify authorization page.
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> Result<Response, RelayError> {
    let redirect = params
        .redirect
        .ok_or(RelayError::MissingParameter("redirect"))?;

    let location = utils::build_authorization_url(
        &state.config.authorize_url(),
        &state.config.client_id,
        &state.config.scopes,
        &redirect,
    );

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// `GET /callback?code=..&redirect_uri=..` completes the authorization-code grant.
///
/// The code arrives as a query parameter, matching how the provider
/// redirects the browser back. The `redirect_uri` has to be the one used
/// for `/login`, otherwise the provider refuses the exchange.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<TokenResponse>, RelayError> {
    let code = params.code.ok_or(RelayError::MissingParameter("code"))?;
    let redirect_uri = params
        .redirect_uri
        .ok_or(RelayError::MissingParameter("redirect_uri"))?;

    let token = state.spotify.exchange_code(&code, &redirect_uri).await?;
    Ok(Json(token))
}

/// `POST /refresh` with a `refresh-token` field, as form or JSON.
pub async fn refresh(
    State(state): State<AppState>,
    Payload(params): Payload<RefreshParams>,
) -> Result<Json<TokenResponse>, RelayError> {
    let refresh_token = params
        .refresh_token
        .ok_or(RelayError::MissingParameter("refresh-token"))?;

    let token = state.spotify.refresh_access_token(&refresh_token).await?;
    Ok(Json(token))
}
