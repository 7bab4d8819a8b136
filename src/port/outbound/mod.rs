//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external collaborators of a pipeline run:
//! the two data providers queried per candidate and the leaderboard store.

pub mod history;
pub mod security;
pub mod store;

pub use history::HistoryProvider;
pub use security::SecurityProvider;
pub use store::LeaderboardStore;
