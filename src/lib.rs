//! Zenith - Token leaderboard scoring pipeline.
//!
//! Evaluates a batch of candidate tokens against a security provider and a
//! price-history provider, scores the survivors, and publishes a capped,
//! ranked leaderboard to a key-value store. Each run replaces the previous
//! leaderboard wholesale.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Candidates, security and return scoring, verdicts, ranking
//! - **`port`** - Traits at the provider, store and trigger boundaries
//! - **`application`** - `Evaluator`, `Dispatcher`, `Ranker`, `Publisher`, `Pipeline`
//! - **`adapter`** - GoPlus and CoinGecko clients, Redis and memory stores, CLI
//! - **`infrastructure`** - Configuration, logging and wiring
//!
//! # Features
//!
//! - `redis-store` (default) - Publish to Redis sorted sets
//! - `testkit` - Expose scripted providers for integration tests
//!
//! # Example
//!
//! ```no_run
//! use zenith::domain::Candidate;
//! use zenith::infrastructure::bootstrap;
//! use zenith::infrastructure::config::Config;
//! use zenith::port::inbound::LeaderboardRunner;
//!
//! # async fn example() -> zenith::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let pipeline = bootstrap::build_pipeline(&config)?;
//! let report = pipeline
//!     .run(vec![Candidate::new("1", "0xabc", "some-coin")])
//!     .await?;
//! println!("{} entries published", report.leaderboard_size);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
