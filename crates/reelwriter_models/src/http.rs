//! Response handling shared by the HTTP adapters.

use crate::Provider;
use reelwriter_error::ProviderError;
use reqwest::Response;
use tracing::error;

/// Convert a reqwest failure into a transport error.
pub(crate) fn transport_error(provider: Provider, err: reqwest::Error) -> ProviderError {
    error!(provider = %provider, error = ?err, "Failed to send request");
    if err.is_timeout() {
        ProviderError::transport(provider.to_string(), format!("request timed out: {err}"))
    } else {
        ProviderError::transport(provider.to_string(), err.to_string())
    }
}

/// Pass successful responses through; turn anything else into a status error
/// carrying the upstream body.
pub(crate) async fn ensure_success(
    provider: Provider,
    response: Response,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
    error!(provider = %provider, status = %status, body = %body, "Provider returned error");
    Err(ProviderError::status(
        provider.to_string(),
        status.as_u16(),
        body,
    ))
}
