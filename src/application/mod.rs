//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate the outbound ports
//! to implement one leaderboard run.

pub mod dispatcher;
pub mod evaluator;
pub mod pipeline;
pub mod publisher;
pub mod ranker;

pub use dispatcher::Dispatcher;
pub use evaluator::{Evaluator, ProviderTimeouts, ScoringConfig};
pub use pipeline::Pipeline;
pub use publisher::Publisher;
pub use ranker::{Ranker, Ranking};
