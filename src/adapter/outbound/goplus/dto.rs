//! GoPlus token-security response types.
//!
//! GoPlus encodes booleans as `"1"`/`"0"` and numbers as decimal strings;
//! absent or empty strings mean "not reported".

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::SecurityAssessment;

/// Envelope returned by `/token_security/{chain}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSecurityResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    /// Per-contract results keyed by lowercase address.
    #[serde(default)]
    pub result: Option<HashMap<String, TokenSecurity>>,
}

impl TokenSecurityResponse {
    /// Result entry for `address`, matched case-insensitively.
    #[must_use]
    pub fn entry(&self, address: &str) -> Option<&TokenSecurity> {
        let result = self.result.as_ref()?;
        result.get(&address.to_lowercase()).or_else(|| {
            result
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(address))
                .map(|(_, entry)| entry)
        })
    }
}

/// Raw risk indicators for one contract.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenSecurity {
    #[serde(default)]
    pub is_honeypot: Option<String>,
    #[serde(default)]
    pub is_malicious: Option<String>,
    #[serde(default)]
    pub buy_tax: Option<String>,
    #[serde(default)]
    pub sell_tax: Option<String>,
    #[serde(default)]
    pub owner_change_balance: Option<String>,
    /// Older field name for the same privilege; either one set counts.
    #[serde(default)]
    pub owner_change_txns: Option<String>,
    #[serde(default)]
    pub can_take_back_ownership: Option<String>,
    #[serde(default)]
    pub liquidity_lock: Option<String>,
    #[serde(default)]
    pub liquidity_locked_percentage: Option<String>,
    #[serde(default)]
    pub is_proxy: Option<String>,
}

impl TokenSecurity {
    #[must_use]
    pub fn to_assessment(&self) -> SecurityAssessment {
        SecurityAssessment {
            honeypot: flag(self.is_honeypot.as_deref()),
            malicious: flag(self.is_malicious.as_deref()),
            buy_tax: number(self.buy_tax.as_deref()),
            sell_tax: number(self.sell_tax.as_deref()),
            owner_privileges: flag(self.owner_change_balance.as_deref())
                || flag(self.owner_change_txns.as_deref())
                || flag(self.can_take_back_ownership.as_deref()),
            liquidity_locked: match self.liquidity_lock.as_deref().map(str::trim) {
                Some("1") => Some(true),
                Some("0") => Some(false),
                _ => None,
            },
            liquidity_locked_percentage: number(self.liquidity_locked_percentage.as_deref()),
            proxy: flag(self.is_proxy.as_deref()),
        }
    }
}

fn flag(value: Option<&str>) -> bool {
    value.map(str::trim) == Some("1")
}

fn number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
