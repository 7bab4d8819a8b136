//! Leaderboard store adapters.

mod memory;
#[cfg(feature = "redis-store")]
mod redis_store;

pub use memory::MemoryStore;
#[cfg(feature = "redis-store")]
pub use redis_store::RedisStore;
