//! Optional shared-secret gate.
//!
//! When `SECRET_TOKEN` is configured every gated request must carry the same
//! value in the `x-token` header. Requests that do not are answered with
//! `401 Not authorized` before any handler runs, so no outbound call is made.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::error::RelayError;

pub const SHARED_SECRET_HEADER: &str = "x-token";

pub async fn shared_secret_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.shared_secret.as_deref() else {
        return next.run(request).await;
    };

    let admitted = request
        .headers()
        .get(SHARED_SECRET_HEADER)
        .is_some_and(|provided| secrets_match(provided.as_bytes(), expected.as_bytes()));

    if !admitted {
        return RelayError::Unauthorized.into_response();
    }

    next.run(request).await
}

/// Answer for paths no route matches. Installed inside the gate so unknown
/// paths are rejected the same way known ones are.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Compares every byte regardless of where the first mismatch is. Only the
/// length is allowed to leak.
fn secrets_match(provided: &[u8], expected: &[u8]) -> bool {
    provided.len() == expected.len()
        && provided
            .iter()
            .zip(expected)
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
