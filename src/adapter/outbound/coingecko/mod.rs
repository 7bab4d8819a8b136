//! CoinGecko OHLC price-history integration.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::CoinGeckoClient;
pub use settings::CoinGeckoConfig;
