//! Wire types for the client-store API

use serde::Deserialize;

/// Per-modification status returned by the version proof endpoint.
///
/// The endpoint returns a JSON object mapping modification id to either a
/// version string or one of two marker strings. Anything that is not a string
/// is treated as an invalid state and skipped by the checker.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionStatus {
    /// The currently published (approved) version.
    Version(String),
    /// The version proof was invalidated.
    Invalidated,
    /// The modification was removed from the store.
    Deleted,
    /// Unexpected non-string value, carried for logging.
    Invalid(serde_json::Value),
}

impl VersionStatus {
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) if s == "INVALIDATED" => Self::Invalidated,
            serde_json::Value::String(s) if s == "DELETED" => Self::Deleted,
            serde_json::Value::String(s) => Self::Version(s),
            other => Self::Invalid(other),
        }
    }
}

/// One entry of a modification's changelog, chronological (oldest first).
/// Only `release` is consumed; the last entry carries the latest version.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChangelogEntry {
    pub changelog: String,
    pub added_at: String,
    pub release: String,
}
