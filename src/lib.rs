//! Release and approval notifier for FlintMC client-store modifications
//!
//! Watches a configured list of modifications, polls the client-store API on a
//! cron schedule, and posts a webhook notification whenever a new version is
//! published or a known version gets approved.
//!
//! # Modules
//!
//! - [`config`]: Environment-sourced configuration and shared constants
//! - [`store`]: Client-store API layer (version proofs, changelogs)
//! - [`watch`]: Update detection (cache, state machine, cycle orchestration)
//! - [`notify`]: Webhook notification delivery
//! - [`scheduler`]: Cron-driven cycle scheduling

pub mod config;
pub mod notify;
pub mod scheduler;
pub mod store;
pub mod watch;
