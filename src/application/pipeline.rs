//! One leaderboard run: dispatch, rank, publish, report.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::dispatcher::Dispatcher;
use super::evaluator::Evaluator;
use super::publisher::Publisher;
use super::ranker::Ranker;
use crate::domain::Candidate;
use crate::error::Result;
use crate::port::inbound::{LeaderboardRunner, RunReport};

/// The full evaluation pipeline.
///
/// Stateless between runs: every call to [`run`](LeaderboardRunner::run)
/// evaluates its own candidate list from scratch and replaces the published
/// leaderboard.
#[derive(Clone)]
pub struct Pipeline {
    evaluator: Evaluator,
    dispatcher: Dispatcher,
    ranker: Ranker,
    publisher: Publisher,
}

impl Pipeline {
    pub const fn new(
        evaluator: Evaluator,
        dispatcher: Dispatcher,
        ranker: Ranker,
        publisher: Publisher,
    ) -> Self {
        Self {
            evaluator,
            dispatcher,
            ranker,
            publisher,
        }
    }
}

#[async_trait]
impl LeaderboardRunner for Pipeline {
    async fn run(&self, candidates: Vec<Candidate>) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let count = candidates.len();
        info!(%run_id, candidates = count, "Pipeline run started");

        let outcomes = self.dispatcher.dispatch(&self.evaluator, candidates).await;
        let ranking = self.ranker.rank(outcomes);
        self.publisher.publish(&ranking.leaderboard).await?;

        let finished_at = Utc::now();
        let report = RunReport {
            run_id,
            started_at,
            finished_at,
            leaderboard_key: self.publisher.key().to_string(),
            candidates: count,
            scored: ranking.passed,
            rejections: ranking.rejections,
            leaderboard_size: ranking.leaderboard.len(),
            top_entry: ranking.leaderboard.top().cloned(),
            leaderboard: ranking.leaderboard.entries().to_vec(),
        };

        info!(
            %run_id,
            scored = report.scored,
            rejected = report.rejected(),
            leaderboard_size = report.leaderboard_size,
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "Pipeline run finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::outbound::store::MemoryStore;
    use crate::application::evaluator::ScoringConfig;
    use crate::domain::{RejectReason, SecurityAssessment, SecurityPolicy};
    use crate::error::Error;
    use crate::testkit::domain::{candidate, rising_series};
    use crate::testkit::provider::{ScriptedHistory, ScriptedSecurity};
    use crate::testkit::store::FailingStore;

    fn pipeline(store: Arc<dyn crate::port::outbound::LeaderboardStore>) -> Pipeline {
        let security = ScriptedSecurity::new()
            .with("0xa", SecurityAssessment::default())
            .with("0xb", SecurityAssessment::default());
        let history = ScriptedHistory::new().with("a", rising_series(30));
        let evaluator = Evaluator::new(
            Arc::new(security),
            Arc::new(history),
            ScoringConfig::default(),
            SecurityPolicy::default(),
        );
        Pipeline::new(
            evaluator,
            Dispatcher::new(2),
            Ranker::new(30),
            Publisher::new(store, "test:board"),
        )
    }

    #[tokio::test]
    async fn report_summarises_the_run() {
        let store = Arc::new(MemoryStore::new());
        let report = pipeline(store.clone())
            .run(vec![candidate("0xa", "a"), candidate("0xb", "b"), candidate("0xc", "c")])
            .await
            .unwrap();

        assert_eq!(report.candidates, 3);
        assert_eq!(report.scored, 1);
        assert_eq!(report.rejected(), 2);
        assert_eq!(report.rejections[&RejectReason::NoHistoricalData], 1);
        assert_eq!(report.rejections[&RejectReason::NoSecurityData], 1);
        assert_eq!(report.leaderboard_key, "test:board");
        assert_eq!(report.leaderboard_size, 1);
        assert_eq!(report.top_entry.as_ref().map(|e| e.address.as_str()), Some("0xa"));
        assert!(report.finished_at >= report.started_at);
        assert_eq!(store.get("test:board").map(|v| v.len()), Some(1));
    }

    #[tokio::test]
    async fn store_failure_fails_the_run() {
        let result = pipeline(Arc::new(FailingStore))
            .run(vec![candidate("0xa", "a")])
            .await;
        assert!(matches!(result, Err(Error::Store(_))));
    }
}
