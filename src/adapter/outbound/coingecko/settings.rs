//! CoinGecko client configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "COINGECKO_API_KEY";

/// `[providers.coingecko]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoConfig {
    /// API root, for example `https://pro-api.coingecko.com/api/v3`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Header carrying the API key.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    #[serde(flatten)]
    pub http: HttpConfig,
    /// Loaded from [`API_KEY_ENV`]; never read from the config file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    "https://pro-api.coingecko.com/api/v3".into()
}

fn default_api_key_header() -> String {
    "x-cg-pro-api-key".into()
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_header: default_api_key_header(),
            http: HttpConfig::default(),
            api_key: None,
        }
    }
}
