//! Security assessment and the 0-10 security score.
//!
//! The security provider reports raw risk indicators for a contract. This
//! module turns them into a bounded score using a configurable
//! [`SecurityPolicy`]:
//!
//! 1. Honeypot or malicious contracts score 0 outright.
//! 2. A buy or sell tax above `max_tax` caps the score at `high_tax_cap`.
//! 3. Owner privileges, an unlocked liquidity pool and proxy contracts each
//!    subtract a penalty.
//!
//! The result is always clamped to `[0, 10]`.
//!
//! # Examples
//!
//! ```
//! use zenith::domain::security::{SecurityAssessment, SecurityPolicy};
//!
//! let assessment = SecurityAssessment {
//!     proxy: true,
//!     ..Default::default()
//! };
//! let score = assessment.score(&SecurityPolicy::default());
//! assert_eq!(score.value(), 9.0);
//! ```

use std::fmt;

use serde::Deserialize;

/// Highest achievable security score.
pub const MAX_SECURITY_SCORE: f64 = 10.0;

/// Risk indicators reported by the security provider for one contract.
///
/// Ephemeral: exists only inside a single evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityAssessment {
    /// Contract is flagged as a honeypot (cannot sell).
    pub honeypot: bool,
    /// Contract is flagged as malicious.
    pub malicious: bool,
    /// Buy tax as a fraction (0.05 = 5%).
    pub buy_tax: Option<f64>,
    /// Sell tax as a fraction.
    pub sell_tax: Option<f64>,
    /// Owner can change balances or take back ownership.
    pub owner_privileges: bool,
    /// Whether liquidity is locked, when the provider reports it.
    pub liquidity_locked: Option<bool>,
    /// Percentage (0-100) of liquidity locked, when reported.
    pub liquidity_locked_percentage: Option<f64>,
    /// Contract is an upgradeable proxy.
    pub proxy: bool,
}

/// Individual risk findings that lowered a security score.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskFlag {
    Honeypot,
    Malicious,
    HighTax(f64),
    OwnerPrivileges,
    LiquidityUnlocked,
    Proxy,
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Honeypot => write!(f, "honeypot"),
            Self::Malicious => write!(f, "malicious"),
            Self::HighTax(tax) => write!(f, "high tax ({:.1}%)", tax * 100.0),
            Self::OwnerPrivileges => write!(f, "owner privileges"),
            Self::LiquidityUnlocked => write!(f, "low/no liquidity lock"),
            Self::Proxy => write!(f, "proxy contract"),
        }
    }
}

/// Weights and limits used to derive the security score.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityPolicy {
    /// Buy/sell tax above which the score is capped.
    #[serde(default = "default_max_tax")]
    pub max_tax: f64,
    /// Cap applied when the tax limit is exceeded.
    #[serde(default = "default_high_tax_cap")]
    pub high_tax_cap: f64,
    /// Penalty for owner privileges.
    #[serde(default = "default_owner_privilege_penalty")]
    pub owner_privilege_penalty: f64,
    /// Penalty for missing or insufficient liquidity lock.
    #[serde(default = "default_liquidity_lock_penalty")]
    pub liquidity_lock_penalty: f64,
    /// Minimum locked liquidity percentage before the lock penalty applies.
    #[serde(default = "default_min_locked_percentage")]
    pub min_locked_percentage: f64,
    /// Penalty for proxy contracts.
    #[serde(default = "default_proxy_penalty")]
    pub proxy_penalty: f64,
}

const fn default_max_tax() -> f64 {
    0.1
}

const fn default_high_tax_cap() -> f64 {
    1.0
}

const fn default_owner_privilege_penalty() -> f64 {
    4.0
}

const fn default_liquidity_lock_penalty() -> f64 {
    3.0
}

const fn default_min_locked_percentage() -> f64 {
    50.0
}

const fn default_proxy_penalty() -> f64 {
    1.0
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            max_tax: default_max_tax(),
            high_tax_cap: default_high_tax_cap(),
            owner_privilege_penalty: default_owner_privilege_penalty(),
            liquidity_lock_penalty: default_liquidity_lock_penalty(),
            min_locked_percentage: default_min_locked_percentage(),
            proxy_penalty: default_proxy_penalty(),
        }
    }
}

/// A derived security score together with the flags that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityScore {
    value: f64,
    flags: Vec<RiskFlag>,
}

impl SecurityScore {
    /// The score, always within `[0, 10]`.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Risk findings that reduced the score.
    #[must_use]
    pub fn flags(&self) -> &[RiskFlag] {
        &self.flags
    }
}

impl SecurityAssessment {
    /// Derive the 0-10 security score under `policy`.
    #[must_use]
    pub fn score(&self, policy: &SecurityPolicy) -> SecurityScore {
        let mut flags = Vec::new();

        if self.honeypot || self.malicious {
            if self.honeypot {
                flags.push(RiskFlag::Honeypot);
            }
            if self.malicious {
                flags.push(RiskFlag::Malicious);
            }
            return SecurityScore { value: 0.0, flags };
        }

        let mut score = MAX_SECURITY_SCORE;

        let tax = self
            .buy_tax
            .unwrap_or(0.0)
            .max(self.sell_tax.unwrap_or(0.0));
        if tax > policy.max_tax {
            score = score.min(policy.high_tax_cap);
            flags.push(RiskFlag::HighTax(tax));
        }

        if self.owner_privileges {
            score -= policy.owner_privilege_penalty;
            flags.push(RiskFlag::OwnerPrivileges);
        }

        let unlocked = self.liquidity_locked == Some(false)
            || self
                .liquidity_locked_percentage
                .is_some_and(|pct| pct < policy.min_locked_percentage);
        if unlocked {
            score -= policy.liquidity_lock_penalty;
            flags.push(RiskFlag::LiquidityUnlocked);
        }

        if self.proxy {
            score -= policy.proxy_penalty;
            flags.push(RiskFlag::Proxy);
        }

        let value = if score.is_finite() {
            score.clamp(0.0, MAX_SECURITY_SCORE)
        } else {
            0.0
        };

        SecurityScore { value, flags }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SecurityPolicy {
        SecurityPolicy::default()
    }

    #[test]
    fn clean_contract_scores_ten() {
        let score = SecurityAssessment::default().score(&policy());
        assert_eq!(score.value(), 10.0);
        assert!(score.flags().is_empty());
    }

    #[test]
    fn honeypot_scores_zero_regardless_of_other_flags() {
        let assessment = SecurityAssessment {
            honeypot: true,
            liquidity_locked: Some(true),
            ..Default::default()
        };
        let score = assessment.score(&policy());
        assert_eq!(score.value(), 0.0);
        assert_eq!(score.flags(), &[RiskFlag::Honeypot]);
    }

    #[test]
    fn malicious_scores_zero() {
        let assessment = SecurityAssessment {
            malicious: true,
            ..Default::default()
        };
        assert_eq!(assessment.score(&policy()).value(), 0.0);
    }

    #[test]
    fn high_tax_caps_score() {
        let assessment = SecurityAssessment {
            sell_tax: Some(0.25),
            ..Default::default()
        };
        let score = assessment.score(&policy());
        assert_eq!(score.value(), 1.0);
        assert_eq!(score.flags(), &[RiskFlag::HighTax(0.25)]);
    }

    #[test]
    fn tax_at_limit_is_not_penalised() {
        let assessment = SecurityAssessment {
            buy_tax: Some(0.1),
            sell_tax: Some(0.1),
            ..Default::default()
        };
        assert_eq!(assessment.score(&policy()).value(), 10.0);
    }

    #[test]
    fn penalties_accumulate() {
        let assessment = SecurityAssessment {
            owner_privileges: true,
            liquidity_locked: Some(false),
            proxy: true,
            ..Default::default()
        };
        // 10 - 4 - 3 - 1
        assert_eq!(assessment.score(&policy()).value(), 2.0);
    }

    #[test]
    fn low_locked_percentage_counts_as_unlocked() {
        let assessment = SecurityAssessment {
            liquidity_locked: Some(true),
            liquidity_locked_percentage: Some(20.0),
            ..Default::default()
        };
        let score = assessment.score(&policy());
        assert_eq!(score.value(), 7.0);
        assert_eq!(score.flags(), &[RiskFlag::LiquidityUnlocked]);
    }

    #[test]
    fn unknown_lock_status_is_not_penalised() {
        let assessment = SecurityAssessment {
            liquidity_locked: None,
            liquidity_locked_percentage: None,
            ..Default::default()
        };
        assert_eq!(assessment.score(&policy()).value(), 10.0);
    }

    #[test]
    fn score_never_goes_negative() {
        let assessment = SecurityAssessment {
            sell_tax: Some(0.5),
            owner_privileges: true,
            liquidity_locked: Some(false),
            proxy: true,
            ..Default::default()
        };
        assert_eq!(assessment.score(&policy()).value(), 0.0);
    }

    #[test]
    fn risk_flag_display() {
        assert_eq!(RiskFlag::HighTax(0.125).to_string(), "high tax (12.5%)");
        assert_eq!(RiskFlag::Proxy.to_string(), "proxy contract");
    }
}
