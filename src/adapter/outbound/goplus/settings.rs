//! GoPlus client configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;

/// `[providers.goplus]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GoPlusConfig {
    /// Token-security endpoint; the chain id is appended as a path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(flatten)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://api.gopluslabs.io/api/v1/token_security".into()
}

impl Default for GoPlusConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            http: HttpConfig::default(),
        }
    }
}
