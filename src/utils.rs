use chrono::{DateTime, TimeDelta, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::RelayError;

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Builds the provider authorization URL for the authorization-code grant.
///
/// `client_id` is inserted as configured; `scopes` and `redirect_uri` are
/// percent-encoded. The redirect URI is not checked against an allow-list.
pub fn build_authorization_url(
    authorize_url: &str,
    client_id: &str,
    scopes: &str,
    redirect_uri: &str,
) -> String {
    format!(
        "{authorize_url}?response_type=code&client_id={client_id}&scope={scope}&redirect_uri={redirect_uri}",
        scope = encode_uri_component(scopes),
        redirect_uri = encode_uri_component(redirect_uri),
    )
}

/// Converts a relative `expires_in` (seconds) into an absolute timestamp.
pub fn expires_at(now: DateTime<Utc>, expires_in: i64) -> Result<DateTime<Utc>, RelayError> {
    TimeDelta::try_seconds(expires_in)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| RelayError::InvalidUpstream(format!("expires_in out of range: {expires_in}")))
}
