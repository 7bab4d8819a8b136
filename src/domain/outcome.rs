//! Per-candidate evaluation results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::score::ScoredCandidate;

/// Why a candidate was kept off the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// Security provider had nothing usable for the contract.
    NoSecurityData,
    /// Security score under the configured minimum.
    SecurityBelowThreshold,
    /// Price-history provider returned no observations.
    NoHistoricalData,
    /// Return ratio under the configured minimum.
    ReturnBelowThreshold,
    /// Provider failure, timeout, or a crashed evaluation task.
    EvaluationError,
}

impl RejectReason {
    /// Stable kebab-case code used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoSecurityData => "no-security-data",
            Self::SecurityBelowThreshold => "security-below-threshold",
            Self::NoHistoricalData => "no-historical-data",
            Self::ReturnBelowThreshold => "return-below-threshold",
            Self::EvaluationError => "evaluation-error",
        }
    }

    /// True for threshold (policy) rejections, false for data problems.
    #[must_use]
    pub const fn is_policy(self) -> bool {
        matches!(
            self,
            Self::SecurityBelowThreshold | Self::ReturnBelowThreshold
        )
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating a single candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Scored(ScoredCandidate),
    Rejected(RejectReason),
}

impl Verdict {
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        matches!(self, Self::Scored(_))
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::Scored(_) => None,
        }
    }
}

/// A verdict tied back to its candidate and input position.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Position of the candidate in the input list; ranking tie-break.
    pub index: usize,
    pub candidate: Candidate,
    pub verdict: Verdict,
}

impl Outcome {
    #[must_use]
    pub const fn new(index: usize, candidate: Candidate, verdict: Verdict) -> Self {
        Self {
            index,
            candidate,
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_are_kebab_case() {
        assert_eq!(RejectReason::NoSecurityData.to_string(), "no-security-data");
        assert_eq!(
            serde_json::to_string(&RejectReason::ReturnBelowThreshold).unwrap(),
            "\"return-below-threshold\""
        );
    }

    #[test]
    fn policy_reasons_are_distinguished_from_data_reasons() {
        assert!(RejectReason::SecurityBelowThreshold.is_policy());
        assert!(RejectReason::ReturnBelowThreshold.is_policy());
        assert!(!RejectReason::NoSecurityData.is_policy());
        assert!(!RejectReason::NoHistoricalData.is_policy());
        assert!(!RejectReason::EvaluationError.is_policy());
    }

    #[test]
    fn verdict_reason() {
        let verdict = Verdict::Rejected(RejectReason::NoHistoricalData);
        assert!(!verdict.is_scored());
        assert_eq!(verdict.reason(), Some(RejectReason::NoHistoricalData));
    }
}
