//! Wholesale replacement of the published leaderboard.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::Leaderboard;
use crate::error::StoreError;
use crate::port::outbound::LeaderboardStore;

/// Default store key.
pub const DEFAULT_LEADERBOARD_KEY: &str = "zenith:leaderboard";

/// Writes a [`Leaderboard`] to a [`LeaderboardStore`] under a fixed key.
#[derive(Clone)]
pub struct Publisher {
    store: Arc<dyn LeaderboardStore>,
    key: String,
}

impl Publisher {
    pub fn new(store: Arc<dyn LeaderboardStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the stored set with `leaderboard`. An empty leaderboard clears
    /// the key so stale entries never outlive a run.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged; the caller decides whether the run
    /// failed.
    pub async fn publish(&self, leaderboard: &Leaderboard) -> Result<(), StoreError> {
        match self.store.replace(&self.key, leaderboard.entries()).await {
            Ok(()) => {
                info!(
                    store = self.store.name(),
                    key = %self.key,
                    entries = leaderboard.len(),
                    "Leaderboard published"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    store = self.store.name(),
                    key = %self.key,
                    error = %e,
                    "Leaderboard publish failed"
                );
                Err(e)
            }
        }
    }
}
