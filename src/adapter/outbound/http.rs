//! Shared HTTP plumbing for the data-provider clients.

use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ProviderError;

/// Timeouts applied to every request a provider client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// TCP/TLS connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build a client honouring these timeouts, falling back to reqwest's
    /// defaults if the builder fails.
    #[must_use]
    pub fn client(&self) -> HttpClient {
        HttpClient::builder()
            .timeout(self.timeout())
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            })
    }
}

/// A successful response body, or the non-success status.
pub(crate) enum Fetched {
    Body(Vec<u8>),
    Status(StatusCode),
}

/// Send `request` once and read the body when the status is a success.
pub(crate) async fn fetch(
    provider: &'static str,
    config: &HttpConfig,
    request: RequestBuilder,
) -> Result<Fetched, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| request_error(provider, config, e))?;

    let status = response.status();
    if !status.is_success() {
        debug!(provider, status = status.as_u16(), "Provider returned non-success status");
        return Ok(Fetched::Status(status));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| request_error(provider, config, e))?;
    Ok(Fetched::Body(body.to_vec()))
}

/// Decode a JSON body, reporting failures as malformed data.
pub(crate) fn decode<T: DeserializeOwned>(
    provider: &'static str,
    body: &[u8],
) -> Result<T, ProviderError> {
    serde_json::from_slice(body).map_err(|e| ProviderError::Malformed {
        provider,
        reason: e.to_string(),
    })
}

fn request_error(provider: &'static str, config: &HttpConfig, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            provider,
            timeout_ms: config.timeout_ms,
        }
    } else {
        ProviderError::Request {
            provider,
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.connect_timeout_ms, 5_000);
    }

    #[test]
    fn decode_reports_malformed_payload() {
        let result: Result<Vec<u32>, _> = decode("test", b"{not json");
        assert!(matches!(
            result,
            Err(ProviderError::Malformed { provider: "test", .. })
        ));
    }
}
