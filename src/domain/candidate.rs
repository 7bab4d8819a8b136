//! Candidate assets handed to the pipeline by the discovery side.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One asset proposed for evaluation in a pipeline run.
///
/// Candidates are immutable once constructed; the evaluator only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Chain or venue identifier understood by the security provider (e.g. `"1"`, `"bsc"`).
    pub chain: String,
    /// Contract or exchange address of the asset.
    pub address: String,
    /// Identifier of the asset at the price-history provider.
    #[serde(alias = "coingecko_id")]
    pub series_id: String,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(
        chain: impl Into<String>,
        address: impl Into<String>,
        series_id: impl Into<String>,
    ) -> Self {
        Self {
            chain: chain.into(),
            address: address.into(),
            series_id: series_id.into(),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_coingecko_alias() {
        let json = r#"{"chain": "1", "address": "0xabc", "coingecko_id": "pepe"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.series_id, "pepe");
    }

    #[test]
    fn display_joins_chain_and_address() {
        let candidate = Candidate::new("bsc", "0xdef", "cake");
        assert_eq!(candidate.to_string(), "bsc:0xdef");
    }
}
