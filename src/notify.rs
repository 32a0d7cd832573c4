//! Webhook notification delivery
//!
//! Builds a Discord-style embed for a release event and posts it to the
//! configured webhook. Delivery is fire-and-forget: the cycle never waits for
//! or reacts to the result, and failures are only logged.

use serde::Serialize;
use tracing::warn;

use crate::config::{REQUEST_TIMEOUT, WebhookConfig};

/// Embed accent color.
const EMBED_COLOR: u32 = 2_463_422;

/// Kind of release event to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A new version was published but is not yet approved.
    Released,
    /// A previously known version got approved.
    Approved,
    /// A new version was published and approved at the same time.
    Both,
}

impl NotificationKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Both => "New approved release",
            Self::Released => "New release",
            Self::Approved => "Release approved",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Self::Both => "released and approved",
            Self::Released => "released",
            Self::Approved => "approved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Embed {
    color: u32,
    title: String,
    description: String,
}

fn build_payload(
    content: &str,
    modification: &str,
    kind: NotificationKind,
    version: &str,
) -> WebhookPayload {
    WebhookPayload {
        content: (!content.trim().is_empty()).then(|| content.to_string()),
        embeds: vec![Embed {
            color: EMBED_COLOR,
            title: kind.title().to_string(),
            description: format!(
                "The version `v{version}` of `{modification}` just got {}!",
                kind.verb()
            ),
        }],
    }
}

/// Posts release notifications to a configured webhook URL.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    content: String,
}

impl WebhookNotifier {
    pub fn new(config: &WebhookConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            url: config.url.clone(),
            content: config.content.clone(),
        }
    }

    /// A blank destination URL disables notifications entirely.
    pub fn enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Sends one notification, detached from the calling cycle. The result is
    /// intentionally discarded; a failed delivery only produces a warning.
    pub fn notify(&self, modification: &str, kind: NotificationKind, version: &str) {
        if !self.enabled() {
            return;
        }

        let client = self.client.clone();
        let url = self.url.clone();
        let payload = build_payload(&self.content, modification, kind, version);
        tokio::spawn(async move {
            if let Err(e) = deliver(&client, &url, &payload).await {
                warn!("failed to deliver webhook notification: {e}");
            }
        });
    }
}

async fn deliver(
    client: &reqwest::Client,
    url: &str,
    payload: &WebhookPayload,
) -> Result<(), reqwest::Error> {
    client
        .post(url)
        .json(payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
