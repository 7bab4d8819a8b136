//! Leaderboard persistence port.

use async_trait::async_trait;

use crate::domain::ScoredCandidate;
use crate::error::StoreError;

/// Key-value store holding named, ranked sets.
///
/// # Implementation Notes
///
/// - [`replace`](Self::replace) must fully supersede the previous contents of
///   `key`. Readers may see the old set or the new set; any window in which
///   they see neither must be brief and documented by the implementation.
/// - An empty `entries` slice clears the key.
/// - `entries` is already ranked, best first; implementations must preserve
///   that order for readers.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Store name for logging.
    fn name(&self) -> &'static str;

    /// Replace the ranked set stored under `key` with `entries`.
    async fn replace(&self, key: &str, entries: &[ScoredCandidate]) -> Result<(), StoreError>;
}
