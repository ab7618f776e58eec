use reqwest::StatusCode;

use super::{SpotifyClient, ensure_success};
use crate::{error::RelayError, types::PlayRequest};

impl SpotifyClient {
    /// Starts or resumes playback.
    ///
    /// Without a `context_uri` the body carries an explicit `null` context,
    /// which the provider treats as "resume the current context". An absent
    /// `device_id` is simply left off the query.
    pub async fn play(
        &self,
        token: &str,
        context_uri: Option<&str>,
        device_id: Option<&str>,
    ) -> Result<StatusCode, RelayError> {
        let mut request = self.http.put(self.api("/me/player/play")).bearer_auth(token);
        if let Some(device_id) = device_id {
            request = request.query(&[("device_id", device_id)]);
        }

        let response = request
            .json(&PlayRequest {
                context_uri: context_uri.map(str::to_string),
            })
            .send()
            .await?;

        Ok(ensure_success(response).await?.status())
    }

    /// Toggles shuffle for the user's playback.
    pub async fn shuffle(
        &self,
        token: &str,
        state: bool,
        device_id: Option<&str>,
    ) -> Result<StatusCode, RelayError> {
        let state = if state { "true" } else { "false" };

        let mut request = self
            .http
            .put(self.api("/me/player/shuffle"))
            .bearer_auth(token)
            .query(&[("state", state)]);
        if let Some(device_id) = device_id {
            request = request.query(&[("device_id", device_id)]);
        }

        let response = request.json(&serde_json::json!({})).send().await?;

        Ok(ensure_success(response).await?.status())
    }
}
