//! Run-level pipeline settings.

use serde::Deserialize;

use crate::application::dispatcher::DEFAULT_CONCURRENCY;
use crate::application::publisher::DEFAULT_LEADERBOARD_KEY;
use crate::application::ranker::DEFAULT_MAX_LEADERBOARD_SIZE;

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Maximum simultaneous candidate evaluations.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Leaderboard capacity.
    #[serde(default = "default_max_leaderboard_size")]
    pub max_leaderboard_size: usize,
    /// Store key the leaderboard is published under.
    #[serde(default = "default_leaderboard_key")]
    pub leaderboard_key: String,
}

const fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

const fn default_max_leaderboard_size() -> usize {
    DEFAULT_MAX_LEADERBOARD_SIZE
}

fn default_leaderboard_key() -> String {
    DEFAULT_LEADERBOARD_KEY.into()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            max_leaderboard_size: default_max_leaderboard_size(),
            leaderboard_key: default_leaderboard_key(),
        }
    }
}
