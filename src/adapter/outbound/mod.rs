//! Outbound adapters (driven side).

pub mod coingecko;
pub mod goplus;
pub mod http;
pub mod store;
