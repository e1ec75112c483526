//! Shared HTTP plumbing: client construction and failure classification.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use bharatai_types::provider::ProviderError;

/// Longest slice of an upstream error body kept in a failure message.
const MAX_ERROR_BODY: usize = 200;

/// Build the shared HTTP client.
///
/// Per-request timeouts come from each provider spec; the connect timeout is
/// a floor for unreachable hosts.
pub fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("bharatai/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Map a non-success HTTP status onto the failure taxonomy.
pub fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    let message = format!("HTTP {status}: {}", truncate(body.trim(), MAX_ERROR_BODY));
    match status.as_u16() {
        401 | 403 => ProviderError::auth(message),
        429 => ProviderError::rate_limited(message),
        _ => ProviderError::upstream(message),
    }
}

/// Map a transport-level failure (connect, timeout, body read).
///
/// The URL is stripped first: data.gov.in carries its key as a query
/// parameter.
pub fn classify_transport(err: reqwest::Error) -> ProviderError {
    let err = err.without_url();
    if err.is_timeout() {
        ProviderError::timeout(format!("request timed out: {err}"))
    } else {
        ProviderError::upstream(format!("request failed: {err}"))
    }
}

/// Send a prepared request and decode the JSON body of a success response.
pub async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, ProviderError> {
    let response = request.send().await.map_err(classify_transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_status(status, &body));
    }

    let bytes = response.bytes().await.map_err(classify_transport)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ProviderError::malformed(format!("response is not valid JSON: {e}")))
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
