//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provider`]: Scripted [`SecurityProvider`](crate::port::outbound::SecurityProvider)
//!   and [`HistoryProvider`](crate::port::outbound::HistoryProvider) mocks with
//!   call counting and in-flight high-water marks.
//! - [`domain`]: Builders for candidates, assessments and price series.
//! - [`store`]: Store doubles that fail on demand.
//! - [`http`]: A canned-response HTTP server for the provider clients.

pub mod domain;
pub mod http;
pub mod provider;
pub mod store;
