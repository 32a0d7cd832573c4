//! Cron-driven cycle scheduling
//!
//! Runs [`UpdateChecker::run_cycle`] on the configured cron schedule in the
//! fixed Europe/Berlin timezone. Triggers that fire while a cycle is still
//! running are skipped instead of overlapping.

use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

use crate::config::TIMEZONE;
use crate::watch::checker::UpdateChecker;

pub struct WatchScheduler {
    scheduler: JobScheduler,
}

impl WatchScheduler {
    pub async fn new(checker: Arc<UpdateChecker>, cron: &str) -> anyhow::Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("failed to create scheduler: {e}"))?;

        let expression = normalize_cron(cron);
        let running = Arc::new(Mutex::new(()));

        let job = Job::new_async_tz(expression.as_str(), TIMEZONE, move |_uuid, _scheduler| {
            let checker = checker.clone();
            let running = running.clone();
            Box::pin(async move {
                // Re-entrancy guard: never start a cycle while one is running.
                let Ok(_guard) = running.try_lock() else {
                    warn!("previous update check still running, skipping this trigger");
                    return;
                };
                let report = checker.run_cycle().await;
                info!(
                    checked = report.checked,
                    skipped = report.skipped,
                    notified = report.notifications.len(),
                    "scheduled update check finished"
                );
            })
        })
        .map_err(|e| anyhow!("invalid cron expression {expression:?}: {e}"))?;

        scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("failed to register update check job: {e}"))?;

        Ok(Self { scheduler })
    }

    pub async fn start(&self) -> anyhow::Result<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("failed to start scheduler: {e}"))?;
        info!("update check scheduler started");
        Ok(())
    }

    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("failed to stop scheduler: {e}"))?;
        info!("update check scheduler stopped");
        Ok(())
    }
}

/// The scheduler expects a seconds field; standard five-field expressions get
/// one prepended so `0 * * * *` fires at second zero of minute zero.
fn normalize_cron(expression: &str) -> String {
    let trimmed = expression.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {trimmed}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0 * * * *", "0 0 * * * *")]
    #[case("*/30 * * * *", "0 */30 * * * *")]
    #[case("0 0 * * * *", "0 0 * * * *")]
    #[case("  0 * * * *  ", "0 0 * * * *")]
    fn normalize_cron_prepends_seconds_to_five_field_expressions(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(normalize_cron(input), expected);
    }
}
