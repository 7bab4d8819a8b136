use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to an external data provider.
///
/// These never abort a run: the dispatcher turns them into an
/// `evaluation-error` rejection for the affected candidate.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} request timed out after {timeout_ms}ms")]
    Timeout {
        provider: &'static str,
        timeout_ms: u64,
    },

    #[error("{provider} returned HTTP {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned malformed data: {reason}")]
    Malformed {
        provider: &'static str,
        reason: String,
    },
}

/// Leaderboard persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[cfg(feature = "redis-store")]
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("failed to encode leaderboard entry: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid candidate input: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, Error>;
