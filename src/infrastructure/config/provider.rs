//! External data-provider settings.

use serde::Deserialize;

use crate::adapter::outbound::coingecko::CoinGeckoConfig;
use crate::adapter::outbound::goplus::GoPlusConfig;

/// `[providers]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub goplus: GoPlusConfig,
    #[serde(default)]
    pub coingecko: CoinGeckoConfig,
}
