//! # Spotify Integration Module
//!
//! Outbound side of the relay. [`SpotifyClient`] wraps one shared
//! `reqwest::Client` (with the configured per-call timeout) together with
//! the provider base URLs, and exposes one method per upstream operation:
//!
//! - [`auth`] - Accounts service: authorization-code exchange and refresh
//! - [`user`] - `GET /me`
//! - [`player`] - `PUT /me/player/play`, `PUT /me/player/shuffle`
//! - [`playlists`] - paginated `GET /me/playlists`
//!
//! Every method makes its calls with the caller's bearer token and never
//! keeps it. Non-success answers are captured as
//! [`RelayError::Upstream`] so handlers can mirror status and body, and
//! calls that never got an answer surface as [`RelayError::Transport`].

pub mod auth;
pub mod player;
pub mod playlists;
pub mod user;

use std::time::Duration;

use reqwest::{Client, Response};

use crate::{config::Config, error::RelayError};

#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    max_playlist_pages: usize,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .connect_timeout(config.upstream_timeout.min(Duration::from_secs(5)))
            .build()?;

        Ok(SpotifyClient {
            http,
            api_url: config.api_url.clone(),
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            max_playlist_pages: config.max_playlist_pages,
        })
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Passes a successful response through and converts anything else into
/// [`RelayError::Upstream`].
async fn ensure_success(response: Response) -> Result<Response, RelayError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(RelayError::from_upstream(response).await)
    }
}
