//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::coingecko::CoinGeckoClient;
use crate::adapter::outbound::goplus::GoPlusClient;
use crate::adapter::outbound::store::MemoryStore;
use crate::application::{Dispatcher, Evaluator, Pipeline, Publisher, Ranker};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::{StoreBackend, StoreConfig};
use crate::port::outbound::{HistoryProvider, LeaderboardStore, SecurityProvider};

/// Build the configured leaderboard store.
///
/// # Errors
///
/// Returns an error if the Redis URL is invalid, or if the Redis backend is
/// selected in a build without the `redis-store` feature.
#[allow(clippy::result_large_err)]
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn LeaderboardStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "redis-store")]
        StoreBackend::Redis => {
            let store = crate::adapter::outbound::store::RedisStore::open(&config.url)?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "redis-store"))]
        StoreBackend::Redis => Err(crate::error::ConfigError::InvalidValue {
            field: "store.backend",
            reason: "redis support requires the redis-store feature".to_string(),
        }
        .into()),
    }
}

/// Wire providers and `store` into a [`Pipeline`] according to `config`.
pub fn build_pipeline_with_store(config: &Config, store: Arc<dyn LeaderboardStore>) -> Pipeline {
    let security: Arc<dyn SecurityProvider> =
        Arc::new(GoPlusClient::from_config(&config.providers.goplus));
    let history: Arc<dyn HistoryProvider> =
        Arc::new(CoinGeckoClient::from_config(&config.providers.coingecko));

    let evaluator = Evaluator::new(
        security,
        history,
        config.scoring.clone(),
        config.security.clone(),
    )
    .with_timeouts(config.provider_timeouts());

    info!(
        store = store.name(),
        key = %config.pipeline.leaderboard_key,
        concurrency = config.pipeline.concurrency,
        max_leaderboard_size = config.pipeline.max_leaderboard_size,
        "Pipeline configured"
    );

    Pipeline::new(
        evaluator,
        Dispatcher::new(config.pipeline.concurrency),
        Ranker::new(config.pipeline.max_leaderboard_size),
        Publisher::new(store, config.pipeline.leaderboard_key.clone()),
    )
}

/// Build a [`Pipeline`] with the store selected by `config.store`.
///
/// # Errors
///
/// Returns an error if the store cannot be created.
#[allow(clippy::result_large_err)]
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let store = build_store(&config.store)?;
    Ok(build_pipeline_with_store(config, store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_builds() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            url: String::new(),
        };
        assert_eq!(build_store(&config).unwrap().name(), "memory");
    }

    #[cfg(feature = "redis-store")]
    #[test]
    fn redis_backend_builds_without_connecting() {
        let store = build_store(&StoreConfig::default()).unwrap();
        assert_eq!(store.name(), "redis");
    }

    #[test]
    fn default_config_builds_pipeline() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;
        assert!(build_pipeline(&config).is_ok());
    }
}
