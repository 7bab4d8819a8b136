//! GoPlus REST client implementing [`SecurityProvider`].

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::dto::TokenSecurityResponse;
use super::settings::GoPlusConfig;
use crate::adapter::outbound::http::{self, Fetched, HttpConfig};
use crate::domain::SecurityAssessment;
use crate::error::ProviderError;
use crate::port::outbound::SecurityProvider;

const PROVIDER: &str = "goplus";

/// Queries `GET {base_url}/{chain}?contract_addresses={address}` once per
/// candidate. No retries.
pub struct GoPlusClient {
    http: HttpClient,
    config: HttpConfig,
    base_url: String,
}

impl GoPlusClient {
    #[must_use]
    pub fn from_config(config: &GoPlusConfig) -> Self {
        Self {
            http: config.http.client(),
            config: config.http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, chain: &str) -> String {
        format!("{}/{}", self.base_url, chain)
    }
}

#[async_trait]
impl SecurityProvider for GoPlusClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn assess(
        &self,
        chain: &str,
        address: &str,
    ) -> Result<Option<SecurityAssessment>, ProviderError> {
        let request = self
            .http
            .get(self.endpoint(chain))
            .query(&[("contract_addresses", address)]);

        let body = match http::fetch(PROVIDER, &self.config, request).await? {
            Fetched::Body(body) => body,
            Fetched::Status(status) => {
                return Err(ProviderError::Status {
                    provider: PROVIDER,
                    status: status.as_u16(),
                })
            }
        };

        let response: TokenSecurityResponse = http::decode(PROVIDER, &body)?;
        match response.entry(address) {
            Some(entry) => {
                debug!(chain, address, "GoPlus assessment fetched");
                Ok(Some(entry.to_assessment()))
            }
            None => {
                warn!(
                    chain,
                    address,
                    code = response.code,
                    message = response.message.as_deref().unwrap_or(""),
                    "GoPlus returned no result for contract"
                );
                Ok(None)
            }
        }
    }
}
