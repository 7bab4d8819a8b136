//! Store doubles.

use async_trait::async_trait;

use crate::domain::ScoredCandidate;
use crate::error::StoreError;
use crate::port::outbound::LeaderboardStore;

/// A store that rejects every write, as an unreachable backend would.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl LeaderboardStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn replace(&self, _key: &str, _entries: &[ScoredCandidate]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
