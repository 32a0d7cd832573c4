//! Update detection layer
//!
//! Compares the latest fetched version and its release status against the
//! persisted per-modification cache and decides what changed.
//!
//! # Modules
//!
//! - [`cache`]: File-per-modification JSON cache of the last seen state
//! - [`detector`]: Pure update-detection state machine
//! - [`checker`]: Runs one full cycle over all watched modifications

pub mod cache;
pub mod checker;
pub mod detector;
