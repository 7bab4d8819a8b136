//! GoPlus token-security integration.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::GoPlusClient;
pub use settings::GoPlusConfig;
