//! Bounded-concurrency fan-out of candidate evaluations.
//!
//! Every candidate is spawned as its own task; a shared semaphore caps how
//! many evaluations hold a permit (and therefore talk to providers) at once.
//! The dispatcher waits for every task before returning, so ranking always
//! sees the complete outcome set.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use super::evaluator::Evaluator;
use crate::domain::{Candidate, Outcome, RejectReason, Verdict};

/// Default number of simultaneous evaluations.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Runs [`Evaluator::evaluate`] over a candidate list with at most
/// `concurrency` evaluations in flight.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    concurrency: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl Dispatcher {
    /// Create a dispatcher. A limit of zero is raised to one.
    #[must_use]
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Evaluate all `candidates` and return one [`Outcome`] per candidate, in
    /// input order.
    ///
    /// A provider error, timeout or panic inside one evaluation becomes an
    /// `evaluation-error` rejection for that candidate only.
    pub async fn dispatch(&self, evaluator: &Evaluator, candidates: Vec<Candidate>) -> Vec<Outcome> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        debug!(
            candidates = candidates.len(),
            concurrency = self.concurrency,
            "Dispatching evaluations"
        );

        let (candidates, handles): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .map(|candidate| {
                let permits = Arc::clone(&permits);
                let evaluator = evaluator.clone();
                let task_candidate = candidate.clone();
                let handle = tokio::spawn(async move {
                    let _permit = match permits.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            warn!(error = %e, "Evaluation permit unavailable");
                            return Verdict::Rejected(RejectReason::EvaluationError);
                        }
                    };
                    match evaluator.evaluate(&task_candidate).await {
                        Ok(verdict) => verdict,
                        Err(e) => {
                            warn!(
                                chain = %task_candidate.chain,
                                address = %task_candidate.address,
                                error = %e,
                                "Evaluation failed"
                            );
                            Verdict::Rejected(RejectReason::EvaluationError)
                        }
                    }
                });
                (candidate, handle)
            })
            .unzip();

        let results = futures_util::future::join_all(handles).await;

        candidates
            .into_iter()
            .zip(results)
            .enumerate()
            .map(|(index, (candidate, result))| {
                let verdict = result.unwrap_or_else(|e| {
                    error!(
                        chain = %candidate.chain,
                        address = %candidate.address,
                        error = %e,
                        "Evaluation task aborted"
                    );
                    Verdict::Rejected(RejectReason::EvaluationError)
                });
                Outcome::new(index, candidate, verdict)
            })
            .collect()
    }
}
