use axum::http::header;

use super::{SpotifyClient, ensure_success};
use crate::{error::RelayError, types::UpstreamBody};

impl SpotifyClient {
    /// Fetches the current user's profile, returned exactly as the provider sent it.
    ///
    /// The body is kept as raw bytes together with its content type, so key
    /// order, number formatting and whitespace reach the caller unchanged.
    pub async fn current_user(&self, token: &str) -> Result<UpstreamBody, RelayError> {
        let response = self
            .http
            .get(self.api("/me"))
            .bearer_auth(token)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        Ok(UpstreamBody {
            status,
            content_type,
            body,
        })
    }
}
