//! Composite scoring of candidates that passed both gates.
//!
//! ```text
//! composite = ratio * return_weight
//!           + security / 10 * security_weight
//!           + log10(min_liquidity) * liquidity_bonus_weight
//! ```
//!
//! The weights need not sum to one. The liquidity term is provisional: it is
//! derived from the configured minimum liquidity rather than the candidate's
//! own liquidity, and stays constant across a run until a real liquidity
//! factor is wired in.
//!
//! # Examples
//!
//! ```
//! use zenith::domain::score::ScoreWeights;
//!
//! let weights = ScoreWeights {
//!     liquidity_bonus_weight: 0.0,
//!     ..Default::default()
//! };
//! let composite = weights.composite(1.0, 10.0);
//! assert!((composite - 0.9).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::security::MAX_SECURITY_SCORE;

/// Decimal places kept for the published return ratio.
pub const RETURN_RATIO_PRECISION: u32 = 4;
/// Decimal places kept for the published security score.
pub const SECURITY_SCORE_PRECISION: u32 = 2;
/// Decimal places kept for the published composite score.
pub const COMPOSITE_PRECISION: u32 = 4;

/// Round `value` half away from zero to `places` decimal places.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Weights combining the sub-scores into the ranking key.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the return ratio.
    #[serde(default = "default_return_weight")]
    pub return_weight: f64,
    /// Weight of the normalised (0-1) security score.
    #[serde(default = "default_security_weight")]
    pub security_weight: f64,
    /// Liquidity constant feeding the provisional bonus term.
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: f64,
    /// Multiplier on `log10(min_liquidity)`.
    #[serde(default = "default_liquidity_bonus_weight")]
    pub liquidity_bonus_weight: f64,
}

const fn default_return_weight() -> f64 {
    0.6
}

const fn default_security_weight() -> f64 {
    0.3
}

const fn default_min_liquidity() -> f64 {
    150_000.0
}

const fn default_liquidity_bonus_weight() -> f64 {
    0.05
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            return_weight: default_return_weight(),
            security_weight: default_security_weight(),
            min_liquidity: default_min_liquidity(),
            liquidity_bonus_weight: default_liquidity_bonus_weight(),
        }
    }
}

impl ScoreWeights {
    /// The provisional liquidity bonus. Monotonic in `min_liquidity`.
    #[must_use]
    pub fn liquidity_bonus(&self) -> f64 {
        if self.min_liquidity <= 0.0 {
            return 0.0;
        }
        self.min_liquidity.log10() * self.liquidity_bonus_weight
    }

    /// Unrounded composite score.
    #[must_use]
    pub fn composite(&self, return_ratio: f64, security_score: f64) -> f64 {
        return_ratio * self.return_weight
            + security_score / MAX_SECURITY_SCORE * self.security_weight
            + self.liquidity_bonus()
    }
}

/// A candidate that passed both gates, with its derived scores.
///
/// All three scores are rounded to their published precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub chain: String,
    pub address: String,
    pub series_id: String,
    /// Sharpe-style return ratio.
    pub return_ratio: f64,
    /// Security score in `[0, 10]`.
    pub security_score: f64,
    /// Ranking key.
    pub composite: f64,
}

impl ScoredCandidate {
    /// Score `candidate` from its raw sub-scores.
    ///
    /// The composite is computed from unrounded inputs and rounded last.
    #[must_use]
    pub fn new(
        candidate: &Candidate,
        return_ratio: f64,
        security_score: f64,
        weights: &ScoreWeights,
    ) -> Self {
        let composite = weights.composite(return_ratio, security_score);
        Self {
            chain: candidate.chain.clone(),
            address: candidate.address.clone(),
            series_id: candidate.series_id.clone(),
            return_ratio: round_to(return_ratio, RETURN_RATIO_PRECISION),
            security_score: round_to(security_score, SECURITY_SCORE_PRECISION),
            composite: round_to(composite, COMPOSITE_PRECISION),
        }
    }
}
