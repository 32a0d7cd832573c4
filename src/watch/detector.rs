//! Update-detection state machine
//!
//! Pure decision logic: given the latest changelog version, whether that
//! version is currently published, and the cached state, decide what changed.
//! Cache writes and notifications are applied by the checker.

use crate::notify::NotificationKind;
use crate::watch::cache::CacheRecord;

/// Result of comparing the fetched state against the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// First observation of this modification. The record is written but no
    /// notification is sent, to avoid spamming on the initial run.
    Created(CacheRecord),
    /// The latest version differs from the cached one.
    Updated {
        record: CacheRecord,
        kind: NotificationKind,
    },
    /// Same version as cached, but it is now published.
    Approved(CacheRecord),
    /// Nothing changed.
    Unchanged,
}

/// Decides the outcome for one modification.
///
/// `is_released` must be the result of exact string equality between the
/// latest changelog version and the published version; no normalization or
/// semantic comparison is applied on purpose.
pub fn detect(
    latest_version: &str,
    is_released: bool,
    cached: Option<&CacheRecord>,
) -> Outcome {
    let Some(cache) = cached else {
        return Outcome::Created(CacheRecord {
            latest_version: latest_version.to_string(),
            released: is_released,
        });
    };

    if cache.latest_version != latest_version {
        let kind = if is_released {
            NotificationKind::Both
        } else {
            NotificationKind::Released
        };
        Outcome::Updated {
            record: CacheRecord {
                latest_version: latest_version.to_string(),
                released: is_released,
            },
            kind,
        }
    } else if !cache.released && is_released {
        Outcome::Approved(CacheRecord {
            latest_version: cache.latest_version.clone(),
            released: true,
        })
    } else {
        Outcome::Unchanged
    }
}
