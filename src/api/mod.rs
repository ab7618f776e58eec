//! # API Module
//!
//! Inbound HTTP endpoints of the Gettify relay, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to the Spotify authorization page
//! - [`callback`] - Exchanges an authorization code for tokens
//! - [`refresh`] - Exchanges a refresh token for a fresh access token
//!
//! ### Player and library
//!
//! - [`get_user`] - Current user's profile, as returned by Spotify
//! - [`get_playlists`] - All of the user's playlists, flattened across pages
//! - [`play`] - Start or resume playback
//! - [`shuffle`] - Toggle shuffle
//!
//! ### Monitoring
//!
//! - [`health`] - Liveness and version, outside the shared-secret gate
//!
//! Every handler issues its outbound call(s) through the shared
//! [`SpotifyClient`] and turns failures into a single response via
//! [`RelayError`](crate::error::RelayError). Tokens arrive with the request
//! and are dropped with it.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use gettify::{api::AppState, server};
//!
//! let app = server::router(AppState::new(config)?);
//! ```

mod auth;
mod extract;
mod gate;
mod health;
mod player;
mod playlists;
mod user;

use std::sync::Arc;

pub use auth::{callback, login, refresh};
pub use extract::{AccessToken, Payload};
pub use gate::{not_found, shared_secret_gate};
pub use health::health;
pub use player::{play, shuffle};
pub use playlists::get_playlists;
pub use user::get_user;

use crate::{config::Config, spotify::SpotifyClient};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: SpotifyClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let spotify = SpotifyClient::new(&config)?;
        Ok(AppState {
            config: Arc::new(config),
            spotify,
        })
    }
}
