//! One full update-check cycle over all watched modifications

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::notify::{NotificationKind, WebhookNotifier};
use crate::store::client::ModStore;
use crate::store::types::VersionStatus;
use crate::watch::cache::ModCache;
use crate::watch::detector::{self, Outcome};

/// Summary of one cycle, used for logging and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Modifications that were fully processed (including no-ops).
    pub checked: usize,
    /// Modifications skipped because of an error or a recognized skip state.
    pub skipped: usize,
    /// Notifications that were emitted this cycle.
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub modification: String,
    pub kind: NotificationKind,
    pub version: String,
}

/// Runs update-check cycles: fetches the version proof once, then processes
/// every watched modification strictly in configured order.
pub struct UpdateChecker {
    store: Arc<dyn ModStore>,
    cache: ModCache,
    notifier: WebhookNotifier,
    watched_mods: Vec<String>,
}

impl UpdateChecker {
    pub fn new(
        store: Arc<dyn ModStore>,
        cache: ModCache,
        notifier: WebhookNotifier,
        watched_mods: Vec<String>,
    ) -> Self {
        Self {
            store,
            cache,
            notifier,
            watched_mods,
        }
    }

    /// Runs one cycle. A version proof failure aborts the whole cycle since
    /// the proof is required context for every decision; all other failures
    /// are isolated to the affected modification.
    pub async fn run_cycle(&self) -> CycleReport {
        debug!("retrieving modification versions");
        let statuses = match self.store.fetch_version_statuses(&self.watched_mods).await {
            Ok(statuses) => statuses,
            Err(e) => {
                error!("{e}");
                return CycleReport::default();
            }
        };

        let mut report = CycleReport::default();

        for modification in &self.watched_mods {
            let releases = match self.store.fetch_changelog_releases(modification).await {
                Ok(releases) => releases,
                Err(e) => {
                    error!("{e}");
                    report.skipped += 1;
                    continue;
                }
            };

            let Some(latest_version) = releases.last() else {
                warn!("{modification} has no changelog entries, skipping");
                report.skipped += 1;
                continue;
            };

            let status = statuses.get(modification);
            match status {
                Some(VersionStatus::Invalid(value)) => {
                    warn!("invalid state on {modification}: {value}");
                    report.skipped += 1;
                    continue;
                }
                Some(VersionStatus::Invalidated) => {
                    warn!("{modification} is invalidated!");
                    report.skipped += 1;
                    continue;
                }
                Some(VersionStatus::Deleted) => {
                    error!("{modification} is deleted!");
                    report.skipped += 1;
                    continue;
                }
                _ => {}
            }

            // Exact string equality; a modification absent from the proof
            // response counts as not released.
            let is_released =
                matches!(status, Some(VersionStatus::Version(version)) if version == latest_version);

            let cached = match self.cache.load(modification) {
                Ok(cached) => cached,
                Err(e) => {
                    error!("failed to read cache of {modification}: {e}");
                    report.skipped += 1;
                    continue;
                }
            };

            let outcome = detector::detect(latest_version, is_released, cached.as_ref());
            let record = match &outcome {
                Outcome::Created(record) => {
                    info!("{modification} is not cached yet, creating");
                    Some(record)
                }
                Outcome::Updated { record, kind } => {
                    if *kind == NotificationKind::Both {
                        info!("{modification} has an update which got released instantly!");
                    } else {
                        info!("{modification} has an update!");
                    }
                    Some(record)
                }
                Outcome::Approved(record) => {
                    info!("{modification} has been released!");
                    Some(record)
                }
                Outcome::Unchanged => {
                    debug!("{modification} did not have any updates");
                    None
                }
            };

            if let Some(record) = record {
                if let Err(e) = self.cache.store(modification, record) {
                    error!("failed to write cache of {modification}: {e}");
                    report.skipped += 1;
                    continue;
                }
            }

            let event = match outcome {
                Outcome::Updated { record, kind } => Some((kind, record.latest_version)),
                Outcome::Approved(record) => {
                    Some((NotificationKind::Approved, record.latest_version))
                }
                Outcome::Created(_) | Outcome::Unchanged => None,
            };
            if let Some((kind, version)) = event {
                self.notifier.notify(modification, kind, &version);
                report.notifications.push(Notification {
                    modification: modification.clone(),
                    kind,
                    version,
                });
            }

            report.checked += 1;
        }

        info!("update check complete");
        report
    }
}
