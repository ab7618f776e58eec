//! Gettify Relay Library
//!
//! This library implements a small stateless relay between a browser client
//! and the Spotify Web API. It performs the OAuth2 authorization-code exchange
//! and refresh on behalf of the client and forwards a handful of player and
//! read requests, attaching the bearer token supplied by the caller.
//!
//! # Modules
//!
//! - `api` - Inbound HTTP handlers and the shared-secret gate
//! - `config` - Immutable configuration loaded once from the environment
//! - `error` - Error taxonomy and its mapping onto HTTP responses
//! - `logging` - Tracing subscriber setup
//! - `server` - Router assembly and the HTTP server loop
//! - `spotify` - Outbound Spotify Accounts and Web API client
//! - `types` - Wire types exchanged with the client and the provider
//! - `utils` - URL building and other small helpers
//!
//! # Example
//!
//! ```no_run
//! use gettify::{config::{self, Config}, server};
//!
//! #[tokio::main]
//! async fn main() -> gettify::Res<()> {
//!     config::load_env();
//!     let config = Config::from_env()?;
//!     server::start_api_server(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the process boundary (`main`, server start-up) where any error
/// is reported to the operator and terminates the program. Request handling
/// uses [`error::RelayError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Writes one line to stdout prefixed with a blue `o`. Used for start-up
/// progress, such as the bound address and which `.env` file was loaded.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// use gettify::info;
///
/// let addr = "127.0.0.1:8080";
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Writes one line to stdout prefixed with a green `✓`, for example once
/// the listener is bound or after a clean shutdown.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// use gettify::success;
///
/// success!("Gettify stopped");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Writes to stderr and terminates the process with exit code 1 right after
/// printing. Only used for fatal start-up errors, such as missing client
/// credentials, where no partial start is acceptable.
///
/// # Arguments
///
/// The macro accepts the same arguments as `eprintln!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```no_run
/// use gettify::error;
///
/// let missing = "SPOTIFY_CLIENT_ID";
/// error!("Cannot load configuration: {} is not set", missing);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Writes one line to stdout prefixed with a yellow `!`. Used for
/// conditions the relay can run with but the operator should know about,
/// such as starting without `SECRET_TOKEN`.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// use gettify::warning;
///
/// warning!("SECRET_TOKEN not set, requests are not gated");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
