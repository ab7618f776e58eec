#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Request, State},
    http::{Method, header},
    middleware::{self, Next},
    response::Response,
};
use gettify::{api::AppState, config::Config, server};
use tokio::net::TcpListener;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const ACCESS_TOKEN: &str = "test-access-token";

/// A request received by the stub provider.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    recorder.requests.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string()),
        body: bytes.clone(),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Serves `router` as a fake Spotify on an ephemeral port.
///
/// Returns the base URL (used as both accounts host and, with `/v1`, API
/// host) and a recorder of every request it received.
pub async fn spawn_provider(router: Router) -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = router.layer(middleware::from_fn_with_state(recorder.clone(), record));

    let addr = spawn(app).await;
    (format!("http://{addr}"), recorder)
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Relay configuration pointing at `provider`, with extra variables on top.
pub fn config(provider: &str, extra: &[(&str, &str)]) -> Config {
    let api_url = format!("{provider}/v1");
    let mut vars: HashMap<String, String> = HashMap::from([
        ("CLIENT_ID".to_string(), CLIENT_ID.to_string()),
        ("CLIENT_SECRET".to_string(), CLIENT_SECRET.to_string()),
        ("SPOTIFY_API_URL".to_string(), api_url),
        ("SPOTIFY_ACCOUNTS_URL".to_string(), provider.to_string()),
        ("LOG_LEVEL".to_string(), "off".to_string()),
    ]);
    for (key, value) in extra {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Starts the relay with `config` and returns its base URL.
pub async fn spawn_relay(config: Config) -> String {
    let app = server::router(AppState::new(config).unwrap());
    let addr = spawn(app).await;
    format!("http://{addr}")
}

/// HTTP client that does not follow redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// An address nothing listens on.
pub async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
