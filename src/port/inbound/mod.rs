//! Inbound (driving) ports consumed by inbound adapters such as the CLI.

pub mod pipeline;

pub use pipeline::{LeaderboardRunner, RunReport};
