//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                      ┌───────────────────────────┐
//!    candidates ──────▶│        Application        │
//!    (inbound)         │ evaluate → rank → publish │
//!                      └───────────────────────────┘
//!                         │          │          │
//!                         ▼          ▼          ▼
//!                   ┌──────────┐┌─────────┐┌─────────────┐
//!                   │ Security ││ History ││ Leaderboard │
//!                   │ Provider ││ Provider││    Store    │
//!                   └──────────┘└─────────┘└─────────────┘
//! ```
//!
//! - [`outbound`]: interfaces implemented by provider and store adapters.
//! - [`inbound`]: what the pipeline reports back to its trigger.

pub mod inbound;
pub mod outbound;
