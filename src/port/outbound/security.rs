//! Security/risk assessment provider port.

use async_trait::async_trait;

use crate::domain::SecurityAssessment;
use crate::error::ProviderError;

/// Source of contract risk indicators.
///
/// # Errors
///
/// [`assess`](Self::assess) returns `Ok(None)` when the provider has no data
/// for the contract and `Err` for transport failures or malformed payloads.
/// Callers treat the two differently: absence is a data rejection, an error
/// is an evaluation failure.
#[async_trait]
pub trait SecurityProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the risk indicators for `address` on `chain`.
    async fn assess(
        &self,
        chain: &str,
        address: &str,
    ) -> Result<Option<SecurityAssessment>, ProviderError>;
}
