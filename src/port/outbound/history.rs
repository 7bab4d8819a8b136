//! Historical price provider port.

use async_trait::async_trait;

use crate::domain::ReturnSeries;
use crate::error::ProviderError;

/// Source of historical closing prices.
///
/// An unknown identifier or an asset without history yields an empty
/// [`ReturnSeries`], not an error. `Err` is reserved for transport failures
/// and malformed payloads.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Fetch closing prices for `series_id` quoted in `currency`, covering
    /// the last `lookback_days` days, oldest first.
    async fn series(
        &self,
        series_id: &str,
        currency: &str,
        lookback_days: u32,
    ) -> Result<ReturnSeries, ProviderError>;
}
