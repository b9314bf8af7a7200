//! Shared reqwest plumbing for the desktop adapters.

use bridge_traits::error::{BridgeError, Result};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::warn;

/// Default request timeout for adapter calls.
///
/// The upload coordinator applies its own per-attempt timeout on top.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("lesson-editor-core/", env!("CARGO_PKG_VERSION"));

/// Longest error body quoted back in a `Rejected` error.
const MAX_ERROR_BODY: usize = 200;

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| BridgeError::NotAvailable(format!("HTTP client: {e}")))
}

pub(crate) fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Map transport failures onto bridge errors.
pub(crate) fn transport_error(err: reqwest::Error) -> BridgeError {
    if err.is_timeout() {
        BridgeError::OperationFailed("Request timed out".to_string())
    } else if err.is_connect() {
        BridgeError::OperationFailed(format!("Connection failed: {err}"))
    } else {
        BridgeError::OperationFailed(err.to_string())
    }
}

/// Turn non-2xx responses into [`BridgeError::Rejected`].
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let response_url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), url = %response_url, "Remote service rejected request");
    Err(BridgeError::Rejected {
        status: status.as_u16(),
        message: truncate_body(&body),
    })
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(build_client(DEFAULT_REQUEST_TIMEOUT).is_ok());
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("  quota exceeded \n"), "quota exceeded");

        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), MAX_ERROR_BODY + 3);
        assert!(truncated.ends_with("..."));
    }
}
