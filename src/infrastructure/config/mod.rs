//! Infrastructure configuration modules.

pub mod logging;
pub mod pipeline;
pub mod provider;
pub mod settings;
pub mod store;

pub use settings::{Config, RunOverrides};
