//! Candidate evaluator: the three-stage gate-and-score pipeline.
//!
//! Each candidate moves through
//! `Pending → SecurityChecked → {Rejected | ReturnChecked} → {Rejected | Scored}`:
//!
//! 1. **Security gate.** Query the security provider; no data rejects with
//!    `no-security-data`, a score under `min_security_score` rejects with
//!    `security-below-threshold`.
//! 2. **Return gate.** Only reached when stage 1 passed. Query price history;
//!    an empty series rejects with `no-historical-data`. A ratio under
//!    `min_return_ratio`, or a series too short or degenerate to yield a
//!    ratio at all, rejects with `return-below-threshold`.
//! 3. **Score.** Combine both sub-scores into the composite.
//!
//! The two provider calls are sequential and each one is bounded by its own
//! timeout. Provider failures and timeouts are returned as `Err` so that the
//! dispatcher can record them as `evaluation-error`. No stage is retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{
    Candidate, RejectReason, ScoreWeights, ScoredCandidate, SecurityPolicy, Verdict,
};
use crate::error::ProviderError;
use crate::port::outbound::{HistoryProvider, SecurityProvider};

/// Thresholds, lookback and weights applied to every candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Minimum security score (0-10) to pass stage 1.
    #[serde(default = "default_min_security_score")]
    pub min_security_score: f64,
    /// Minimum return ratio to pass stage 2.
    #[serde(default = "default_min_return_ratio")]
    pub min_return_ratio: f64,
    /// Price-history window in days.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Quote currency for price history.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Fewer closes than this yield a ratio of 0.
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,
    /// Annualisation factor applied to the per-period ratio.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: f64,
    /// Composite weights.
    #[serde(flatten)]
    pub weights: ScoreWeights,
}

const fn default_min_security_score() -> f64 {
    5.0
}

const fn default_min_return_ratio() -> f64 {
    0.5
}

const fn default_lookback_days() -> u32 {
    30
}

fn default_currency() -> String {
    "usd".to_string()
}

const fn default_min_observations() -> usize {
    5
}

const fn default_periods_per_year() -> f64 {
    365.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_security_score: default_min_security_score(),
            min_return_ratio: default_min_return_ratio(),
            lookback_days: default_lookback_days(),
            currency: default_currency(),
            min_observations: default_min_observations(),
            periods_per_year: default_periods_per_year(),
            weights: ScoreWeights::default(),
        }
    }
}

/// Upper bounds for each provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimeouts {
    pub security: Duration,
    pub history: Duration,
}

impl Default for ProviderTimeouts {
    fn default() -> Self {
        Self {
            security: Duration::from_secs(10),
            history: Duration::from_secs(10),
        }
    }
}

/// Evaluates one candidate against both providers.
///
/// Cheap to clone: providers and configuration are shared behind `Arc`.
/// Holds no mutable state, so any number of evaluations may run at once.
#[derive(Clone)]
pub struct Evaluator {
    security: Arc<dyn SecurityProvider>,
    history: Arc<dyn HistoryProvider>,
    scoring: Arc<ScoringConfig>,
    policy: Arc<SecurityPolicy>,
    timeouts: ProviderTimeouts,
}

impl Evaluator {
    /// Create an evaluator with default provider timeouts.
    pub fn new(
        security: Arc<dyn SecurityProvider>,
        history: Arc<dyn HistoryProvider>,
        scoring: ScoringConfig,
        policy: SecurityPolicy,
    ) -> Self {
        Self {
            security,
            history,
            scoring: Arc::new(scoring),
            policy: Arc::new(policy),
            timeouts: ProviderTimeouts::default(),
        }
    }

    /// Replace the per-call timeouts.
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: ProviderTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Run the three stages for `candidate`.
    ///
    /// # Errors
    ///
    /// Returns the provider error when a call fails or times out. Missing data
    /// and threshold failures are not errors; they come back as
    /// [`Verdict::Rejected`].
    pub async fn evaluate(&self, candidate: &Candidate) -> Result<Verdict, ProviderError> {
        debug!(chain = %candidate.chain, address = %candidate.address, "Evaluating candidate");

        // Stage 1: security gate.
        let assessment = bounded(
            self.security.name(),
            self.timeouts.security,
            self.security.assess(&candidate.chain, &candidate.address),
        )
        .await?;

        let Some(assessment) = assessment else {
            return Ok(reject(candidate, RejectReason::NoSecurityData, None, 0.0));
        };

        let security = assessment.score(&self.policy);
        if !security.flags().is_empty() {
            let flags: Vec<String> = security.flags().iter().map(ToString::to_string).collect();
            debug!(
                address = %candidate.address,
                score = security.value(),
                flags = %flags.join(", "),
                "Security risk flags"
            );
        }

        if security.value() < self.scoring.min_security_score {
            return Ok(reject(
                candidate,
                RejectReason::SecurityBelowThreshold,
                Some(security.value()),
                self.scoring.min_security_score,
            ));
        }

        // Stage 2: historical-return gate.
        let series = bounded(
            self.history.name(),
            self.timeouts.history,
            self.history.series(
                &candidate.series_id,
                &self.scoring.currency,
                self.scoring.lookback_days,
            ),
        )
        .await?;

        if series.is_empty() {
            return Ok(reject(candidate, RejectReason::NoHistoricalData, None, 0.0));
        }

        // Too short, flat or degenerate series have no ratio and never pass.
        let ratio = match series
            .sharpe_ratio(self.scoring.min_observations, self.scoring.periods_per_year)
        {
            Some(ratio) if ratio >= self.scoring.min_return_ratio => ratio,
            measured => {
                return Ok(reject(
                    candidate,
                    RejectReason::ReturnBelowThreshold,
                    measured,
                    self.scoring.min_return_ratio,
                ));
            }
        };

        // Stage 3: composite.
        let scored = ScoredCandidate::new(candidate, ratio, security.value(), &self.scoring.weights);
        info!(
            address = %candidate.address,
            ratio = scored.return_ratio,
            security = scored.security_score,
            composite = scored.composite,
            "Candidate scored"
        );
        Ok(Verdict::Scored(scored))
    }
}

/// Log and build a rejection.
///
/// Data problems log at WARN. Threshold misses log at INFO with the measured
/// value, which is absent when the series produced no ratio.
fn reject(
    candidate: &Candidate,
    reason: RejectReason,
    measured: Option<f64>,
    threshold: f64,
) -> Verdict {
    if reason.is_policy() {
        info!(
            chain = %candidate.chain,
            address = %candidate.address,
            reason = %reason,
            measured,
            threshold,
            "Candidate rejected"
        );
    } else {
        warn!(
            chain = %candidate.chain,
            address = %candidate.address,
            reason = %reason,
            "Candidate rejected"
        );
    }
    Verdict::Rejected(reason)
}

/// Await `call`, failing with [`ProviderError::Timeout`] after `limit`.
async fn bounded<T, F>(provider: &'static str, limit: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout {
            provider,
            timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReturnSeries, SecurityAssessment};
    use crate::testkit::domain::{candidate, rising_series};
    use crate::testkit::provider::{ScriptedHistory, ScriptedSecurity};

    fn evaluator(security: ScriptedSecurity, history: ScriptedHistory) -> Evaluator {
        Evaluator::new(
            Arc::new(security),
            Arc::new(history),
            ScoringConfig::default(),
            SecurityPolicy::default(),
        )
    }

    #[tokio::test]
    async fn clean_candidate_is_scored() {
        let security = ScriptedSecurity::new().with("0xa", SecurityAssessment::default());
        let history = ScriptedHistory::new().with("a", rising_series(30));
        let verdict = evaluator(security, history)
            .evaluate(&candidate("0xa", "a"))
            .await
            .unwrap();

        match verdict {
            Verdict::Scored(scored) => {
                assert_eq!(scored.security_score, 10.0);
                assert!(scored.return_ratio >= 0.5);
                assert!(scored.composite > 0.0);
            }
            Verdict::Rejected(reason) => panic!("unexpected rejection: {reason}"),
        }
    }

    #[tokio::test]
    async fn missing_security_data_rejects_without_history_call() {
        let security = ScriptedSecurity::new();
        let history = ScriptedHistory::new().with("a", rising_series(30));
        let history_probe = history.probe();
        let verdict = evaluator(security, history)
            .evaluate(&candidate("0xa", "a"))
            .await
            .unwrap();

        assert_eq!(verdict, Verdict::Rejected(RejectReason::NoSecurityData));
        assert_eq!(history_probe.calls(), 0);
    }

    #[tokio::test]
    async fn low_security_short_circuits_history() {
        let risky = SecurityAssessment {
            owner_privileges: true,
            liquidity_locked: Some(false),
            ..Default::default()
        };
        let security = ScriptedSecurity::new().with("0xa", risky);
        let history = ScriptedHistory::new().with("a", rising_series(30));
        let history_probe = history.probe();
        let verdict = evaluator(security, history)
            .evaluate(&candidate("0xa", "a"))
            .await
            .unwrap();

        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::SecurityBelowThreshold)
        );
        assert_eq!(history_probe.calls(), 0);
    }

    #[tokio::test]
    async fn empty_history_rejects() {
        let security = ScriptedSecurity::new().with("0xa", SecurityAssessment::default());
        let history = ScriptedHistory::new();
        let verdict = evaluator(security, history)
            .evaluate(&candidate("0xa", "a"))
            .await
            .unwrap();

        assert_eq!(verdict, Verdict::Rejected(RejectReason::NoHistoricalData));
    }

    #[tokio::test]
    async fn short_history_fails_return_gate() {
        let security = ScriptedSecurity::new().with("0xa", SecurityAssessment::default());
        let history = ScriptedHistory::new().with("a", rising_series(3));
        let verdict = evaluator(security, history)
            .evaluate(&candidate("0xa", "a"))
            .await
            .unwrap();

        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::ReturnBelowThreshold)
        );
    }

    fn permissive(security: ScriptedSecurity, history: ScriptedHistory, threshold: f64) -> Evaluator {
        Evaluator::new(
            Arc::new(security),
            Arc::new(history),
            ScoringConfig {
                min_return_ratio: threshold,
                ..ScoringConfig::default()
            },
            SecurityPolicy::default(),
        )
    }

    #[tokio::test]
    async fn degenerate_series_fails_any_threshold() {
        let broken = ReturnSeries::new(vec![0.0, 0.0, 1.0, f64::NAN, 2.0, 3.0]);
        let flat = ReturnSeries::new(vec![4.0; 10]);
        for threshold in [0.0, -1.0, f64::MIN] {
            for series in [broken.clone(), flat.clone()] {
                let security = ScriptedSecurity::new().with("0xa", SecurityAssessment::default());
                let history = ScriptedHistory::new().with("a", series);
                let verdict = permissive(security, history, threshold)
                    .evaluate(&candidate("0xa", "a"))
                    .await
                    .unwrap();

                assert_eq!(
                    verdict,
                    Verdict::Rejected(RejectReason::ReturnBelowThreshold),
                    "threshold {threshold}"
                );
            }
        }
    }

    #[tokio::test]
    async fn negative_ratio_passes_negative_threshold() {
        let falling = ReturnSeries::new(vec![10.0, 9.0, 8.5, 7.0, 6.9, 6.0]);
        let security = ScriptedSecurity::new().with("0xa", SecurityAssessment::default());
        let history = ScriptedHistory::new().with("a", falling);
        let verdict = permissive(security, history, f64::MIN)
            .evaluate(&candidate("0xa", "a"))
            .await
            .unwrap();

        match verdict {
            Verdict::Scored(scored) => assert!(scored.return_ratio < 0.0),
            Verdict::Rejected(reason) => panic!("unexpected rejection: {reason}"),
        }
    }

    #[tokio::test]
    async fn provider_error_is_returned() {
        let security = ScriptedSecurity::new().failing("0xa");
        let history = ScriptedHistory::new();
        let result = evaluator(security, history)
            .evaluate(&candidate("0xa", "a"))
            .await;

        assert!(matches!(result, Err(ProviderError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn slow_history_times_out() {
        let security = ScriptedSecurity::new().with("0xa", SecurityAssessment::default());
        let history = ScriptedHistory::new()
            .with("a", rising_series(30))
            .with_delay(Duration::from_millis(500));
        let evaluator = evaluator(security, history).with_timeouts(ProviderTimeouts {
            security: Duration::from_secs(1),
            history: Duration::from_millis(20),
        });

        let result = evaluator.evaluate(&candidate("0xa", "a")).await;
        assert!(matches!(
            result,
            Err(ProviderError::Timeout {
                timeout_ms: 20,
                ..
            })
        ));
    }

    #[test]
    fn scoring_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.min_security_score, 5.0);
        assert_eq!(config.min_return_ratio, 0.5);
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.currency, "usd");
        assert_eq!(config.weights.return_weight, 0.6);
        assert_eq!(config.weights.security_weight, 0.3);
    }
}
