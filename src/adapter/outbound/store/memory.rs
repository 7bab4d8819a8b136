//! In-process leaderboard store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::ScoredCandidate;
use crate::error::StoreError;
use crate::port::outbound::LeaderboardStore;

/// Holds leaderboards in a map guarded by a read-write lock.
///
/// Replacement swaps the whole vector under the write lock, so readers see
/// either the previous or the new leaderboard. Used for `--dry-run` and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    boards: RwLock<HashMap<String, Vec<ScoredCandidate>>>,
    replacements: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current leaderboard under `key`; `None` once cleared or never written.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<ScoredCandidate>> {
        self.boards.read().get(key).cloned()
    }

    /// Number of completed `replace` calls.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.replacements.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeaderboardStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn replace(&self, key: &str, entries: &[ScoredCandidate]) -> Result<(), StoreError> {
        {
            let mut boards = self.boards.write();
            if entries.is_empty() {
                boards.remove(key);
            } else {
                boards.insert(key.to_string(), entries.to_vec());
            }
        }
        self.replacements.fetch_add(1, Ordering::SeqCst);
        debug!(key, entries = entries.len(), "Memory leaderboard replaced");
        Ok(())
    }
}
