//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration loading, logging and runtime wiring.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root building a [`Pipeline`](crate::application::Pipeline)
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
