//! Configuration management for the Gettify relay.
//!
//! Configuration is read exactly once at start-up into an immutable
//! [`Config`] value which is then handed to the server and shared by every
//! request handler. Nothing outside this module reads the process
//! environment.
//!
//! Values are looked up in this order:
//! 1. Environment variables (highest priority)
//! 2. A `.env` file in the working directory
//! 3. A `.env` file in the local data directory (`gettify/.env`)
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use tracing::level_filters::LevelFilter;

use crate::error::ConfigError;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_SCOPES: &str = "user-modify-playback-state user-read-playback-state streaming user-read-birthdate user-read-email user-read-private playlist-read-private playlist-read-collaborative";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MAX_PLAYLIST_PAGES: usize = 100;

/// Runtime configuration of the relay.
#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    /// When set, every gated request must carry this value in `x-token`.
    pub shared_secret: Option<String>,
    pub server_address: SocketAddr,
    /// Web API base, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// Accounts service base, e.g. `https://accounts.spotify.com`.
    pub accounts_url: String,
    pub scopes: String,
    pub upstream_timeout: Duration,
    pub max_playlist_pages: usize,
    pub log_level: LevelFilter,
}

// Secrets stay out of debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("shared_secret", &self.shared_secret.as_ref().map(|_| "<redacted>"))
            .field("server_address", &self.server_address)
            .field("api_url", &self.api_url)
            .field("accounts_url", &self.accounts_url)
            .field("scopes", &self.scopes)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("max_playlist_pages", &self.max_playlist_pages)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first if `.env` files should be taken into account.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as absent. Every missing required variable
    /// is reported at once rather than one per start attempt.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] if `CLIENT_ID` or `CLIENT_SECRET` is absent
    /// - [`ConfigError::Invalid`] if an optional value cannot be parsed
    ///
    /// # Example
    ///
    /// ```
    /// use gettify::config::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "CLIENT_ID" => Some("id".to_string()),
    ///     "CLIENT_SECRET" => Some("secret".to_string()),
    ///     _ => None,
    /// })?;
    /// assert!(config.shared_secret.is_none());
    /// # Ok::<(), gettify::error::ConfigError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = get("CLIENT_ID");
        let client_secret = get("CLIENT_SECRET");

        let (client_id, client_secret) = match (client_id, client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            (id, secret) => {
                let mut missing = Vec::new();
                if id.is_none() {
                    missing.push("CLIENT_ID");
                }
                if secret.is_none() {
                    missing.push("CLIENT_SECRET");
                }
                return Err(ConfigError::Missing(missing));
            }
        };

        let timeout_secs: u64 = parse_or(
            "UPSTREAM_TIMEOUT_SECS",
            get("UPSTREAM_TIMEOUT_SECS"),
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                reason: "must be at least 1".to_string(),
            });
        }

        let max_playlist_pages: usize = parse_or(
            "MAX_PLAYLIST_PAGES",
            get("MAX_PLAYLIST_PAGES"),
            DEFAULT_MAX_PLAYLIST_PAGES,
        )?;
        if max_playlist_pages == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_PLAYLIST_PAGES",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Config {
            client_id,
            client_secret,
            shared_secret: get("SECRET_TOKEN"),
            server_address: parse_or(
                "SERVER_ADDRESS",
                get("SERVER_ADDRESS"),
                SocketAddr::from_str(DEFAULT_SERVER_ADDRESS).map_err(|e| ConfigError::Invalid {
                    key: "SERVER_ADDRESS",
                    reason: e.to_string(),
                })?,
            )?,
            api_url: trim_base(get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string())),
            accounts_url: trim_base(
                get("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string()),
            ),
            scopes: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPES.to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
            max_playlist_pages,
            log_level: parse_or("LOG_LEVEL", get("LOG_LEVEL"), LevelFilter::INFO)?,
        })
    }

    /// The provider's authorization endpoint.
    pub fn authorize_url(&self) -> String {
        format!("{}/authorize", self.accounts_url)
    }

    /// The provider's token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url)
    }
}

/// Loads `.env` files into the process environment.
///
/// Variables that are already set are never overwritten, so real environment
/// variables win over `./.env`, which in turn wins over the copy in the
/// local data directory (`~/.local/share/gettify/.env` on Linux). Missing
/// files are silently skipped.
pub fn load_env() {
    let _ = dotenv::dotenv();

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("gettify/.env");
    if path.is_file() {
        let _ = dotenv::from_path(path);
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
