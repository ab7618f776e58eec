//! Error types for the relay.
//!
//! [`RelayError`] covers everything that can go wrong while serving a
//! request and knows how to turn itself into exactly one HTTP response.
//! [`ConfigError`] only exists during start-up.

use axum::{
    Json,
    body::Bytes,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::types::UpstreamBody;

#[derive(Debug, Error)]
pub enum RelayError {
    /// A required request input was not supplied by the caller.
    #[error("missing {0}")]
    MissingParameter(&'static str),

    /// The shared-secret gate rejected the request.
    #[error("not authorized")]
    Unauthorized,

    /// The provider answered with a non-success status.
    #[error("upstream responded with {status}")]
    Upstream {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },

    /// The outbound call failed before any response arrived.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with success but an unusable body.
    #[error("invalid upstream response: {0}")]
    InvalidUpstream(String),

    #[error("playlist pagination exceeded {0} pages")]
    PageLimitExceeded(usize),
}

impl RelayError {
    /// Captures a non-success provider response so it can be mirrored.
    pub async fn from_upstream(response: reqwest::Response) -> Self {
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();

        match response.bytes().await {
            Ok(body) => RelayError::Upstream {
                status,
                content_type,
                body,
            },
            Err(e) => RelayError::Transport(e),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::Upstream { status, .. } => *status,
            RelayError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Transport(_) => StatusCode::BAD_GATEWAY,
            RelayError::InvalidUpstream(_) => StatusCode::BAD_GATEWAY,
            RelayError::PageLimitExceeded(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match self {
            RelayError::Unauthorized => (status, "Not authorized").into_response(),
            RelayError::Upstream {
                content_type, body, ..
            } => {
                tracing::warn!(%status, "upstream request failed");
                UpstreamBody {
                    status,
                    content_type,
                    body,
                }
                .into_response()
            }
            RelayError::MissingParameter(_) => {
                (status, Json(json!({ "error": message }))).into_response()
            }
            _ => {
                // reqwest errors carry the URL, never the token
                tracing::warn!(%status, error = %message, "relay failed");
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
