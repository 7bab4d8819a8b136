//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file in which every field has a
//! default, followed by environment overrides for values that must not live
//! in the file (`COINGECKO_API_KEY`) or that vary per deployment
//! (`REDIS_URL`).
//!
//! # Example
//!
//! ```no_run
//! use zenith::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use super::pipeline::PipelineConfig;
use super::provider::ProvidersConfig;
use super::store::{StoreBackend, StoreConfig, REDIS_URL_ENV};
use crate::adapter::outbound::coingecko::settings::API_KEY_ENV;
use crate::application::evaluator::{ProviderTimeouts, ScoringConfig};
use crate::domain::security::MAX_SECURITY_SCORE;
use crate::domain::SecurityPolicy;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Concurrency, leaderboard size and key.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Gate thresholds, history window and composite weights.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Penalties used to derive the security score.
    #[serde(default)]
    pub security: SecurityPolicy,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Command-line overrides for a single run.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub concurrency: Option<usize>,
    pub max_leaderboard_size: Option<usize>,
    pub min_security_score: Option<f64>,
    pub min_return_ratio: Option<f64>,
    pub leaderboard_key: Option<String>,
    pub log_level: Option<String>,
    /// Publish to the in-memory store instead of the configured backend.
    pub dry_run: bool,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// The CoinGecko API key and the Redis URL are taken from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // The API key is never read from the config file.
        self.providers.coingecko.api_key = lookup(API_KEY_ENV).filter(|key| !key.is_empty());
        if let Some(url) = lookup(REDIS_URL_ENV).filter(|url| !url.is_empty()) {
            self.store.url = url;
        }
    }

    /// Apply command-line overrides and re-validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an override produces an invalid configuration.
    #[allow(clippy::result_large_err)]
    pub fn apply_overrides(&mut self, overrides: &RunOverrides) -> Result<()> {
        if let Some(concurrency) = overrides.concurrency {
            self.pipeline.concurrency = concurrency;
        }
        if let Some(size) = overrides.max_leaderboard_size {
            self.pipeline.max_leaderboard_size = size;
        }
        if let Some(score) = overrides.min_security_score {
            self.scoring.min_security_score = score;
        }
        if let Some(ratio) = overrides.min_return_ratio {
            self.scoring.min_return_ratio = ratio;
        }
        if let Some(key) = &overrides.leaderboard_key {
            self.pipeline.leaderboard_key.clone_from(key);
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level.clone_from(level);
        }
        if overrides.dry_run {
            self.store.backend = StoreBackend::Memory;
        }
        self.validate()
    }

    /// Per-call provider timeouts derived from the HTTP settings.
    #[must_use]
    pub const fn provider_timeouts(&self) -> ProviderTimeouts {
        ProviderTimeouts {
            security: self.providers.goplus.http.timeout(),
            history: self.providers.coingecko.http.timeout(),
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.concurrency == 0 {
            return Err(invalid("concurrency", "must be greater than 0"));
        }
        if self.pipeline.max_leaderboard_size == 0 {
            return Err(invalid("max_leaderboard_size", "must be greater than 0"));
        }
        if self.pipeline.leaderboard_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "leaderboard_key",
            }
            .into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("logging.format", "must be \"pretty\" or \"json\""));
        }

        self.validate_scoring()?;
        self.validate_security()?;

        for (field, base_url, http) in [
            (
                "providers.goplus.base_url",
                &self.providers.goplus.base_url,
                &self.providers.goplus.http,
            ),
            (
                "providers.coingecko.base_url",
                &self.providers.coingecko.base_url,
                &self.providers.coingecko.http,
            ),
        ] {
            Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
            if http.timeout_ms == 0 || http.connect_timeout_ms == 0 {
                return Err(invalid("timeout_ms", "provider timeouts must be greater than 0"));
            }
        }

        if self.providers.coingecko.api_key_header.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_key_header",
            }
            .into());
        }

        if self.store.backend == StoreBackend::Redis {
            let url = Url::parse(&self.store.url).map_err(|e| ConfigError::InvalidValue {
                field: "store.url",
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "redis" | "rediss" | "redis+unix") {
                return Err(invalid("store.url", "must use the redis:// or rediss:// scheme"));
            }
        }

        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_scoring(&self) -> Result<()> {
        let scoring = &self.scoring;
        if !(0.0..=MAX_SECURITY_SCORE).contains(&scoring.min_security_score) {
            return Err(invalid("min_security_score", "must be between 0 and 10"));
        }
        if !scoring.min_return_ratio.is_finite() {
            return Err(invalid("min_return_ratio", "must be a finite number"));
        }
        if scoring.lookback_days == 0 {
            return Err(invalid("lookback_days", "must be greater than 0"));
        }
        if scoring.currency.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "currency" }.into());
        }
        if scoring.min_observations < 2 {
            return Err(invalid("min_observations", "must be at least 2"));
        }
        if !(scoring.periods_per_year.is_finite() && scoring.periods_per_year > 0.0) {
            return Err(invalid("periods_per_year", "must be greater than 0"));
        }

        let weights = &scoring.weights;
        for (field, value) in [
            ("return_weight", weights.return_weight),
            ("security_weight", weights.security_weight),
            ("liquidity_bonus_weight", weights.liquidity_bonus_weight),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, "must be 0 or greater"));
            }
        }
        if !(weights.min_liquidity.is_finite() && weights.min_liquidity > 0.0) {
            return Err(invalid("min_liquidity", "must be greater than 0"));
        }
        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_security(&self) -> Result<()> {
        let policy = &self.security;
        if !(0.0..=1.0).contains(&policy.max_tax) {
            return Err(invalid("max_tax", "must be between 0 and 1"));
        }
        if !(0.0..=MAX_SECURITY_SCORE).contains(&policy.high_tax_cap) {
            return Err(invalid("high_tax_cap", "must be between 0 and 10"));
        }
        if !(0.0..=100.0).contains(&policy.min_locked_percentage) {
            return Err(invalid("min_locked_percentage", "must be between 0 and 100"));
        }
        for (field, value) in [
            ("owner_privilege_penalty", policy.owner_privilege_penalty),
            ("liquidity_lock_penalty", policy.liquidity_lock_penalty),
            ("proxy_penalty", policy.proxy_penalty),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, "must be 0 or greater"));
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
