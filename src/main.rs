use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use flint_notifier::config::Config;
use flint_notifier::notify::WebhookNotifier;
use flint_notifier::scheduler::WatchScheduler;
use flint_notifier::store::client::{DEFAULT_BASE_URL, StoreClient};
use flint_notifier::watch::cache::ModCache;
use flint_notifier::watch::checker::UpdateChecker;

#[derive(Parser)]
#[command(name = "flint-notifier")]
#[command(version, about = "Release and approval notifier for FlintMC client-store modifications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single update check and exit
    Check,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Some(Command::Check) => runtime.block_on(run_once(&config)),
        None => runtime.block_on(run_daemon(&config)),
    }
}

fn build_checker(config: &Config) -> UpdateChecker {
    let store = Arc::new(StoreClient::new(DEFAULT_BASE_URL, &config.labymod_version));
    let cache = ModCache::new(config.cache_dir.clone());
    let notifier = WebhookNotifier::new(&config.webhook);
    UpdateChecker::new(store, cache, notifier, config.watched_mods.clone())
}

async fn run_once(config: &Config) -> anyhow::Result<()> {
    let report = build_checker(config).run_cycle().await;
    info!(
        checked = report.checked,
        skipped = report.skipped,
        notified = report.notifications.len(),
        "update check finished"
    );
    Ok(())
}

async fn run_daemon(config: &Config) -> anyhow::Result<()> {
    let checker = Arc::new(build_checker(config));

    // The first check runs immediately; the schedule covers the rest.
    checker.run_cycle().await;

    let mut scheduler = WatchScheduler::new(checker, &config.cron).await?;
    scheduler.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    scheduler.shutdown().await
}
