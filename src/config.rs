use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Shared constants
// =============================================================================

/// Fixed timezone for the cron schedule.
pub const TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::Berlin;

/// Explicit timeout for all remote calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client identification sent with every client-store request.
pub const USER_AGENT: &str = "flint-notifier (FlintMC client-store release watcher)";

/// Default cron schedule (hourly, at minute zero).
pub const DEFAULT_CRON: &str = "0 * * * *";

/// Default LabyMod version used as path segment of the proof endpoint.
pub const DEFAULT_LABYMOD_VERSION: &str = "4.2.47";

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = ".cache";

/// Runtime configuration, constructed once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Cron schedule expression, evaluated in [`TIMEZONE`].
    pub cron: String,
    /// LabyMod version path segment for the version proof endpoint.
    pub labymod_version: String,
    /// Watched modification identifiers, lowercased, in configured order.
    pub watched_mods: Vec<String>,
    pub webhook: WebhookConfig,
    pub cache_dir: PathBuf,
}

/// Webhook destination and optional plain-text content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WebhookConfig {
    /// Destination URL; blank (after trimming) disables notifications.
    pub url: String,
    /// Optional content shown above the embed.
    pub content: String,
}

impl Config {
    /// Reads the configuration from environment variables, applying defaults
    /// for anything unset or empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            cron: non_empty("CRON_INTERVAL").unwrap_or_else(|| DEFAULT_CRON.to_string()),
            labymod_version: non_empty("LABYMOD_VERSION")
                .unwrap_or_else(|| DEFAULT_LABYMOD_VERSION.to_string()),
            watched_mods: lookup("WATCHED_MODS")
                .unwrap_or_default()
                .split(',')
                .map(|modification| modification.to_lowercase())
                .collect(),
            webhook: WebhookConfig {
                url: lookup("DISCORD_WEBHOOK").unwrap_or_default(),
                content: lookup("DISCORD_CONTENT").unwrap_or_default(),
            },
            cache_dir: non_empty("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
        }
    }
}
