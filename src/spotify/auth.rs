use chrono::Utc;

use super::{SpotifyClient, ensure_success};
use crate::{
    error::RelayError,
    types::{TokenGrant, TokenResponse},
    utils,
};

impl SpotifyClient {
    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// Sends a single form POST with `grant_type=authorization_code` to the
    /// Accounts token endpoint. `expires` in the result is the time of the
    /// call plus the provider's `expires_in`.
    ///
    /// # Errors
    ///
    /// - [`RelayError::Upstream`] with the provider's status and body
    /// - [`RelayError::Transport`] if no response was received
    /// - [`RelayError::InvalidUpstream`] if the grant cannot be decoded
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, RelayError> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ])
        .await
    }

    /// Obtains a new access token from a refresh token.
    ///
    /// The provider does not always rotate the refresh token. When it does
    /// not, `refresh_token` in the result is `None`.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, RelayError> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn request_token(&self, grant: &[(&str, &str)]) -> Result<TokenResponse, RelayError> {
        let requested_at = Utc::now();

        let mut form: Vec<(&str, &str)> = grant.to_vec();
        form.push(("client_id", self.client_id.as_str()));
        form.push(("client_secret", self.client_secret.as_str()));

        let response = self.http.post(&self.token_url).form(&form).send().await?;
        let response = ensure_success(response).await?;

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| RelayError::InvalidUpstream(format!("token grant: {e}")))?;

        Ok(TokenResponse {
            expires: utils::expires_at(requested_at, grant.expires_in)?,
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
        })
    }
}
