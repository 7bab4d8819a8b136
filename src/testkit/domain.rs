//! Builders for domain primitives used across tests.

use crate::domain::{Candidate, ReturnSeries, SecurityAssessment, SecurityPolicy};

/// Chain used by [`candidate`].
pub const TEST_CHAIN: &str = "1";

/// A candidate on [`TEST_CHAIN`].
pub fn candidate(address: &str, series_id: &str) -> Candidate {
    Candidate::new(TEST_CHAIN, address, series_id)
}

/// Closing prices starting at 100 that follow `returns` period by period.
pub fn series_from_returns(returns: &[f64]) -> ReturnSeries {
    let mut closes = Vec::with_capacity(returns.len() + 1);
    let mut price = 100.0;
    closes.push(price);
    for r in returns {
        price *= 1.0 + r;
        closes.push(price);
    }
    ReturnSeries::new(closes)
}

/// `len` closes alternating +2% and 0% moves: a comfortably passing ratio.
pub fn rising_series(len: usize) -> ReturnSeries {
    let returns: Vec<f64> = (0..len.saturating_sub(1))
        .map(|i| if i % 2 == 0 { 0.02 } else { 0.0 })
        .collect();
    series_from_returns(&returns)
}

/// `len` closes alternating `up` and `down` moves.
///
/// The annualised ratio is `(up + down) / |up - down| * sqrt(365)` for an
/// even number of returns, which makes it easy to order candidates.
pub fn alternating_series(len: usize, up: f64, down: f64) -> ReturnSeries {
    let returns: Vec<f64> = (0..len.saturating_sub(1))
        .map(|i| if i % 2 == 0 { up } else { down })
        .collect();
    series_from_returns(&returns)
}

/// Policy whose penalties make 8.5, 9.0 and 4.0 reachable with one flag each:
/// proxy (-1.5), unlocked liquidity (-1.0), owner privileges (-6.0).
pub fn fractional_policy() -> SecurityPolicy {
    SecurityPolicy {
        owner_privilege_penalty: 6.0,
        liquidity_lock_penalty: 1.0,
        proxy_penalty: 1.5,
        ..Default::default()
    }
}

/// Scores 8.5 under [`fractional_policy`].
pub fn proxy_assessment() -> SecurityAssessment {
    SecurityAssessment {
        proxy: true,
        ..Default::default()
    }
}

/// Scores 9.0 under [`fractional_policy`].
pub fn unlocked_assessment() -> SecurityAssessment {
    SecurityAssessment {
        liquidity_locked: Some(false),
        ..Default::default()
    }
}

/// Scores 4.0 under [`fractional_policy`].
pub fn privileged_assessment() -> SecurityAssessment {
    SecurityAssessment {
        owner_privileges: true,
        ..Default::default()
    }
}

/// 31 closes whose annualised ratio (365 periods) is `target`.
///
/// Alternates a +2% move with the down move that puts
/// `(up + down) / |up - down|` at `target / sqrt(365)`.
pub fn series_with_ratio(target: f64) -> ReturnSeries {
    let k = target / 365f64.sqrt();
    let up = 0.02;
    let down = up * (k - 1.0) / (k + 1.0);
    alternating_series(31, up, down)
}
