//! CoinGecko REST client implementing [`HistoryProvider`].

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, warn};

use super::dto::{self, OhlcRows};
use super::settings::CoinGeckoConfig;
use crate::adapter::outbound::http::{self, Fetched, HttpConfig};
use crate::domain::ReturnSeries;
use crate::error::ProviderError;
use crate::port::outbound::HistoryProvider;

const PROVIDER: &str = "coingecko";

/// Queries `GET {base_url}/coins/{id}/ohlc?vs_currency=..&days=..` once per
/// candidate. A 404 (unknown coin) is reported as an empty series.
pub struct CoinGeckoClient {
    http: HttpClient,
    config: HttpConfig,
    base_url: String,
    api_key_header: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    #[must_use]
    pub fn from_config(config: &CoinGeckoConfig) -> Self {
        if config.api_key.is_none() {
            warn!("No CoinGecko API key configured, requests may be rate limited");
        }
        Self {
            http: config.http.client(),
            config: config.http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key_header: config.api_key_header.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn endpoint(&self, series_id: &str) -> String {
        format!("{}/coins/{}/ohlc", self.base_url, series_id)
    }
}

#[async_trait]
impl HistoryProvider for CoinGeckoClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn series(
        &self,
        series_id: &str,
        currency: &str,
        lookback_days: u32,
    ) -> Result<ReturnSeries, ProviderError> {
        let mut request = self.http.get(self.endpoint(series_id)).query(&[
            ("vs_currency", currency.to_string()),
            ("days", lookback_days.to_string()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header(self.api_key_header.as_str(), key);
        }

        let body = match http::fetch(PROVIDER, &self.config, request).await? {
            Fetched::Body(body) => body,
            Fetched::Status(StatusCode::NOT_FOUND) => {
                warn!(series_id, "CoinGecko has no such coin");
                return Ok(ReturnSeries::default());
            }
            Fetched::Status(status) => {
                return Err(ProviderError::Status {
                    provider: PROVIDER,
                    status: status.as_u16(),
                })
            }
        };

        let rows: OhlcRows = http::decode(PROVIDER, &body)?;
        let series = dto::closes(&rows).map_err(|reason| ProviderError::Malformed {
            provider: PROVIDER,
            reason,
        })?;
        debug!(series_id, observations = series.len(), "CoinGecko history fetched");
        Ok(series)
    }
}
