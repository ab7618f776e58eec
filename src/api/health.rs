use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use super::AppState;

/// Liveness check for the relay. Never gated; `gate` tells whether the other
/// routes expect an `x-token`.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "gate": state.config.shared_secret.is_some(),
    }))
}
