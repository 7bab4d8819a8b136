//! Leaderboard store settings.

use std::fmt;

use serde::Deserialize;

/// Environment variable overriding [`StoreConfig::url`].
pub const REDIS_URL_ENV: &str = "REDIS_URL";

/// Which store implementation to publish to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Redis connection URL.
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    "redis://127.0.0.1/".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: default_url(),
        }
    }
}
