use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderValue, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::RelayError;

pub const ACCESS_TOKEN_HEADER: &str = "access-token";
pub const CONTEXT_URI_HEADER: &str = "context-uri";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Bearer token supplied by the caller in the `access-token` header.
pub struct AccessToken(pub String);

impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = RelayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| AccessToken(v.to_string()))
            .ok_or(RelayError::MissingParameter("access-token header"))
    }
}

/// Request body accepted either as JSON or as a URL-encoded form.
///
/// JSON is used when the `Content-Type` says so; everything else is parsed
/// as a form. A request without any `Content-Type` (typically one with no
/// body at all) is read as an empty form, so missing fields surface as
/// `None` and the handler reports them itself.
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(mut request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match content_type {
            Some(value) if value.starts_with("application/json") => {
                let Json(value) = Json::<T>::from_request(request, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Payload(value))
            }
            other => {
                if other.is_none() {
                    request
                        .headers_mut()
                        .insert(header::CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                }
                let Form(value) = Form::<T>::from_request(request, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Payload(value))
            }
        }
    }
}
