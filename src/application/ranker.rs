//! Ranking of evaluation outcomes into a capped leaderboard.

use std::collections::BTreeMap;

use tracing::info;

use crate::domain::{Leaderboard, Outcome, RejectReason, Verdict};

/// Default leaderboard capacity.
pub const DEFAULT_MAX_LEADERBOARD_SIZE: usize = 30;

/// Leaderboard plus per-reason rejection counts for one run.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub leaderboard: Leaderboard,
    /// Candidates that passed both gates, before the size cap.
    pub passed: usize,
    pub rejections: BTreeMap<RejectReason, usize>,
}

/// Sorts scored outcomes and applies the size cap.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    max_size: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEADERBOARD_SIZE)
    }
}

impl Ranker {
    #[must_use]
    pub const fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// Tally rejections and build the leaderboard from `outcomes`.
    #[must_use]
    pub fn rank(&self, outcomes: Vec<Outcome>) -> Ranking {
        let candidates = outcomes.len();
        let mut rejections = BTreeMap::new();
        let mut passed = 0;
        for outcome in &outcomes {
            match outcome.verdict {
                Verdict::Scored(_) => passed += 1,
                Verdict::Rejected(reason) => *rejections.entry(reason).or_insert(0) += 1,
            }
        }

        let leaderboard = Leaderboard::rank(outcomes, self.max_size);
        info!(
            event = "leaderboard_generation",
            candidates,
            passed,
            leaderboard_size = leaderboard.len(),
            top_composite = leaderboard.top().map(|e| e.composite),
            "Leaderboard generated"
        );

        Ranking {
            leaderboard,
            passed,
            rejections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, ScoredCandidate};

    fn outcome(index: usize, verdict: Verdict) -> Outcome {
        let name = format!("t{index}");
        Outcome::new(index, Candidate::new("1", &name, &name), verdict)
    }

    fn scored(index: usize, composite: f64) -> Outcome {
        let name = format!("t{index}");
        outcome(
            index,
            Verdict::Scored(ScoredCandidate {
                chain: "1".into(),
                address: name.clone(),
                series_id: name,
                return_ratio: 1.0,
                security_score: 10.0,
                composite,
            }),
        )
    }

    #[test]
    fn counts_passed_and_rejections_by_reason() {
        let outcomes = vec![
            scored(0, 1.0),
            outcome(1, Verdict::Rejected(RejectReason::NoSecurityData)),
            outcome(2, Verdict::Rejected(RejectReason::NoSecurityData)),
            outcome(3, Verdict::Rejected(RejectReason::EvaluationError)),
            scored(4, 2.0),
        ];

        let ranking = Ranker::default().rank(outcomes);

        assert_eq!(ranking.passed, 2);
        assert_eq!(ranking.rejections[&RejectReason::NoSecurityData], 2);
        assert_eq!(ranking.rejections[&RejectReason::EvaluationError], 1);
        assert!(!ranking.rejections.contains_key(&RejectReason::ReturnBelowThreshold));
        assert_eq!(ranking.leaderboard.top().map(|e| e.composite), Some(2.0));
    }

    #[test]
    fn passed_counts_entries_dropped_by_the_cap() {
        let outcomes = (0..5).map(|i| scored(i, i as f64)).collect();
        let ranking = Ranker::new(2).rank(outcomes);
        assert_eq!(ranking.passed, 5);
        assert_eq!(ranking.leaderboard.len(), 2);
    }
}
