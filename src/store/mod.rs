//! Client-store API layer
//!
//! Talks to the FlintMC client-store: one batched version proof call per cycle
//! and one changelog call per watched modification.
//!
//! # Modules
//!
//! - [`client`]: `ModStore` trait and the reqwest-backed `StoreClient`
//! - [`types`]: Wire types (`VersionStatus`, `ChangelogEntry`)
//! - [`error`]: Error types for store operations

pub mod client;
pub mod error;
pub mod types;
