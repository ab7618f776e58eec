mod common;

use axum::{
    Form, Json, Router,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;

use common::{CLIENT_ID, CLIENT_SECRET};

fn token_endpoint(rotate_refresh_token: bool) -> Router {
    Router::new().route(
        "/api/token",
        post(move |Form(form): Form<HashMap<String, String>>| async move {
            let mut body = json!({
                "access_token": format!("access-for-{}", form["grant_type"]),
                "token_type": "Bearer",
                "scope": "user-read-private",
                "expires_in": 3600,
            });
            if rotate_refresh_token {
                body["refresh_token"] = json!("fresh-refresh-token");
            }
            Json(body)
        }),
    )
}

fn assert_expires_in_an_hour(body: &Value, before: DateTime<Utc>, after: DateTime<Utc>) {
    let expires: DateTime<Utc> = body["expires"]
        .as_str()
        .unwrap()
        .parse::<DateTime<Utc>>()
        .unwrap();
    let tolerance = TimeDelta::seconds(2);
    let expected_low = before + TimeDelta::seconds(3600) - tolerance;
    let expected_high = after + TimeDelta::seconds(3600) + tolerance;
    assert!(expires >= expected_low, "{expires} < {expected_low}");
    assert!(expires <= expected_high, "{expires} > {expected_high}");
}

#[tokio::test]
async fn test_login_redirects_to_authorization_page() {
    let relay = common::spawn_relay(common::config(
        "https://accounts.example.test",
        &[("SPOTIFY_API_AUTH_SCOPE", "user-read-private playlist-read-private")],
    ))
    .await;

    let response = common::client()
        .get(format!("{relay}/login"))
        .query(&[("redirect", "http://localhost:3000/callback?x=1")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert_eq!(
        location,
        format!(
            "https://accounts.example.test/authorize?response_type=code&client_id={CLIENT_ID}\
             &scope=user-read-private%20playlist-read-private\
             &redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback%3Fx%3D1"
        )
    );
}

#[tokio::test]
async fn test_login_without_redirect_is_rejected() {
    let relay = common::spawn_relay(common::config("https://accounts.example.test", &[])).await;

    let response = common::client()
        .get(format!("{relay}/login"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "missing redirect");
}

#[tokio::test]
async fn test_callback_exchanges_code_for_tokens() {
    let (provider, recorder) = common::spawn_provider(token_endpoint(true)).await;
    let relay = common::spawn_relay(common::config(&provider, &[])).await;

    let before = Utc::now();
    let response = common::client()
        .get(format!("{relay}/callback"))
        .query(&[
            ("code", "auth-code-123"),
            ("redirect_uri", "http://localhost:3000/callback"),
        ])
        .send()
        .await
        .unwrap();
    let after = Utc::now();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["accessToken"], "access-for-authorization_code");
    assert_eq!(body["refreshToken"], "fresh-refresh-token");
    assert_expires_in_an_hour(&body, before, after);

    let requests = recorder.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/token");
    let form = String::from_utf8(requests[0].body.to_vec()).unwrap();
    assert!(form.contains("grant_type=authorization_code"));
    assert!(form.contains("code=auth-code-123"));
    assert!(form.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback"));
    assert!(form.contains(&format!("client_id={CLIENT_ID}")));
    assert!(form.contains(&format!("client_secret={CLIENT_SECRET}")));
}

#[tokio::test]
async fn test_callback_mirrors_provider_error_body() {
    let provider_body = r#"{"error":"invalid_grant","error_description":"Invalid authorization code"}"#;
    let (provider, _) = common::spawn_provider(Router::new().route(
        "/api/token",
        post(move || async move {
            (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                provider_body,
            )
                .into_response()
        }),
    ))
    .await;
    let relay = common::spawn_relay(common::config(&provider, &[])).await;

    let response = common::client()
        .get(format!("{relay}/callback"))
        .query(&[("code", "expired"), ("redirect_uri", "http://localhost:3000")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), provider_body);
}

#[tokio::test]
async fn test_callback_without_code_makes_no_upstream_call() {
    let (provider, recorder) = common::spawn_provider(token_endpoint(true)).await;
    let relay = common::spawn_relay(common::config(&provider, &[])).await;

    let response = common::client()
        .get(format!("{relay}/callback"))
        .query(&[("redirect_uri", "http://localhost:3000")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn test_refresh_omits_refresh_token_when_not_rotated() {
    let (provider, recorder) = common::spawn_provider(token_endpoint(false)).await;
    let relay = common::spawn_relay(common::config(&provider, &[])).await;

    let before = Utc::now();
    let response = common::client()
        .post(format!("{relay}/refresh"))
        .form(&[("refresh-token", "old-refresh-token")])
        .send()
        .await
        .unwrap();
    let after = Utc::now();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["accessToken"], "access-for-refresh_token");
    assert!(body.get("refreshToken").is_none());
    assert_expires_in_an_hour(&body, before, after);

    let form = String::from_utf8(recorder.requests()[0].body.to_vec()).unwrap();
    assert!(form.contains("grant_type=refresh_token"));
    assert!(form.contains("refresh_token=old-refresh-token"));
}

#[tokio::test]
async fn test_refresh_accepts_json_body_and_passes_rotated_token() {
    let (provider, _) = common::spawn_provider(token_endpoint(true)).await;
    let relay = common::spawn_relay(common::config(&provider, &[])).await;

    let response = common::client()
        .post(format!("{relay}/refresh"))
        .json(&json!({ "refresh-token": "old-refresh-token" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["refreshToken"], "fresh-refresh-token");
}

#[tokio::test]
async fn test_refresh_without_token_is_rejected() {
    let (provider, recorder) = common::spawn_provider(token_endpoint(true)).await;
    let relay = common::spawn_relay(common::config(&provider, &[])).await;

    let response = common::client()
        .post(format!("{relay}/refresh"))
        .form(&[("something-else", "x")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn test_refresh_with_empty_request_reports_missing_token() {
    let (provider, recorder) = common::spawn_provider(token_endpoint(true)).await;
    let relay = common::spawn_relay(common::config(&provider, &[])).await;

    let response = common::client()
        .post(format!("{relay}/refresh"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "missing refresh-token");
    assert_eq!(recorder.count(), 0);
}
