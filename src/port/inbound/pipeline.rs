//! Trigger-boundary contract for a single pipeline run.
//!
//! A scheduler, webhook or the CLI hands the pipeline a candidate list and
//! gets back a [`RunReport`]. A run that scored nothing is still a success;
//! only infrastructure faults (for instance an unreachable store) surface as
//! errors.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Candidate, RejectReason, ScoredCandidate};
use crate::error::Result;

/// Summary of one completed and published run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique identifier of the run, also attached to log events.
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Store key the leaderboard was published under.
    pub leaderboard_key: String,
    /// Number of candidates received.
    pub candidates: usize,
    /// Number of candidates that passed both gates.
    pub scored: usize,
    /// Rejection counts per reason.
    pub rejections: BTreeMap<RejectReason, usize>,
    /// Size of the published leaderboard.
    pub leaderboard_size: usize,
    /// Highest-ranked entry, if anything qualified.
    pub top_entry: Option<ScoredCandidate>,
    /// The published leaderboard, best first.
    pub leaderboard: Vec<ScoredCandidate>,
}

impl RunReport {
    /// Total number of rejected candidates.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }
}

/// Runs the evaluate, rank and publish pipeline over a candidate list.
#[async_trait]
pub trait LeaderboardRunner: Send + Sync {
    /// Evaluate `candidates`, publish the resulting leaderboard and report.
    ///
    /// # Errors
    ///
    /// Returns an error only when the leaderboard could not be published.
    /// Individual candidate failures are reported in [`RunReport::rejections`].
    async fn run(&self, candidates: Vec<Candidate>) -> Result<RunReport>;
}
