use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{Res, api, api::AppState, config::Config, info, success, warning};

/// Builds the relay router.
///
/// `/health` sits outside the shared-secret gate; every other route is
/// behind it, unmatched paths included. CORS is permissive and every request is traced without its
/// headers.
pub fn router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/refresh", post(api::refresh))
        .route("/getUser", get(api::get_user))
        .route("/getPlaylists", get(api::get_playlists))
        .route("/play", get(api::play))
        .route("/shuffle", put(api::shuffle))
        .fallback(api::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::shared_secret_gate,
        ));

    Router::new()
        .merge(gated)
        .route("/health", get(api::health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the relay on `listener` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Res<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Binds the configured address and runs the relay.
pub async fn start_api_server(config: Config) -> Res<()> {
    if config.shared_secret.is_none() {
        warning!("SECRET_TOKEN not set, requests are not gated");
    }

    let addr = config.server_address;
    let state = AppState::new(config)?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Gettify running at {}", listener.local_addr()?);

    serve(listener, state).await?;

    success!("Gettify stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutting down");
}
