//! Client-store API client

use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

use chrono::Utc;
use tracing::warn;

use crate::config::{REQUEST_TIMEOUT, USER_AGENT};
use crate::store::error::StoreError;
use crate::store::types::{ChangelogEntry, VersionStatus};

/// Default base URL for the FlintMC client-store API.
pub const DEFAULT_BASE_URL: &str = "https://flintmc.net/api/client-store";

/// Trait for fetching modification version data from the client-store.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ModStore: Send + Sync {
    /// Fetches the published-version status for all watched modifications in
    /// a single call.
    ///
    /// A bare-array response means "no data" and yields an empty map.
    async fn fetch_version_statuses(
        &self,
        modifications: &[String],
    ) -> Result<HashMap<String, VersionStatus>, StoreError>;

    /// Fetches the changelog of one modification and returns the release
    /// version of every entry, preserving order. The last element is the
    /// latest known version.
    async fn fetch_changelog_releases(
        &self,
        modification: &str,
    ) -> Result<Vec<String>, StoreError>;
}

/// reqwest-backed client-store implementation.
pub struct StoreClient {
    client: reqwest::Client,
    base_url: String,
    labymod_version: String,
}

impl StoreClient {
    /// Creates a new StoreClient with a custom base URL
    pub fn new(base_url: &str, labymod_version: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
            labymod_version: labymod_version.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ModStore for StoreClient {
    async fn fetch_version_statuses(
        &self,
        modifications: &[String],
    ) -> Result<HashMap<String, VersionStatus>, StoreError> {
        let url = format!(
            "{}/proof-modification-versions/{}",
            self.base_url, self.labymod_version
        );

        let response = self
            .client
            .post(&url)
            .json(&modifications)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(StoreError::VersionProof)?;

        let body: serde_json::Value = response.json().await.map_err(StoreError::VersionProof)?;

        match body {
            // Bare list means the store has no data for this LabyMod version.
            serde_json::Value::Array(_) => Ok(HashMap::new()),
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(modification, value)| (modification, VersionStatus::from_value(value)))
                .collect()),
            other => {
                warn!("unexpected version proof response shape: {other}");
                Err(StoreError::InvalidResponse(format!(
                    "expected object or array, got: {other}"
                )))
            }
        }
    }

    async fn fetch_changelog_releases(
        &self,
        modification: &str,
    ) -> Result<Vec<String>, StoreError> {
        // Cache-bust with the current timestamp; intermediaries are not
        // assumed to treat this endpoint as uncacheable.
        let url = format!(
            "{}/get-modification-changelogs/{}?cache={}",
            self.base_url,
            modification,
            Utc::now().timestamp_millis()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| StoreError::Changelog {
                modification: modification.to_string(),
                source,
            })?;

        let entries: Vec<ChangelogEntry> =
            response
                .json()
                .await
                .map_err(|source| StoreError::Changelog {
                    modification: modification.to_string(),
                    source,
                })?;

        Ok(entries.into_iter().map(|entry| entry.release).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn mods(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[tokio::test]
    async fn fetch_version_statuses_parses_keyed_mapping() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/proof-modification-versions/4.2.47")
            .match_body(Matcher::Json(json!(["examplemod", "othermod"])))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"examplemod": "1.1", "othermod": "INVALIDATED"}"#)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "4.2.47");
        let statuses = client
            .fetch_version_statuses(&mods(&["examplemod", "othermod"]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            statuses.get("examplemod"),
            Some(&VersionStatus::Version("1.1".to_string()))
        );
        assert_eq!(statuses.get("othermod"), Some(&VersionStatus::Invalidated));
    }

    #[tokio::test]
    async fn fetch_version_statuses_treats_bare_list_as_no_data() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/proof-modification-versions/4.2.47")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "4.2.47");
        let statuses = client
            .fetch_version_statuses(&mods(&["examplemod"]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(statuses.is_empty());
    }

    #[tokio::test]
    async fn fetch_version_statuses_preserves_non_string_values() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/proof-modification-versions/4.2.47")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"examplemod": 3}"#)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "4.2.47");
        let statuses = client
            .fetch_version_statuses(&mods(&["examplemod"]))
            .await
            .unwrap();

        assert_eq!(
            statuses.get("examplemod"),
            Some(&VersionStatus::Invalid(json!(3)))
        );
    }

    #[tokio::test]
    async fn fetch_version_statuses_fails_on_server_error() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/proof-modification-versions/4.2.47")
            .with_status(500)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "4.2.47");
        let result = client.fetch_version_statuses(&mods(&["examplemod"])).await;

        assert!(matches!(result, Err(StoreError::VersionProof(_))));
    }

    #[tokio::test]
    async fn fetch_changelog_releases_returns_releases_in_order() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/get-modification-changelogs/examplemod")
            .match_query(Matcher::Regex(r"cache=\d+".to_string()))
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"changelog": "Initial release", "added_at": "2024-01-01 00:00:00", "release": "1.0"},
                    {"changelog": "Bug fixes", "added_at": "2024-02-01 00:00:00", "release": "1.1"}
                ]"#,
            )
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "4.2.47");
        let releases = client.fetch_changelog_releases("examplemod").await.unwrap();

        mock.assert_async().await;
        assert_eq!(releases, vec!["1.0".to_string(), "1.1".to_string()]);
    }

    #[tokio::test]
    async fn fetch_changelog_releases_error_names_the_modification() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/get-modification-changelogs/examplemod")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "4.2.47");
        let error = client
            .fetch_changelog_releases("examplemod")
            .await
            .unwrap_err();

        assert!(matches!(
            &error,
            StoreError::Changelog { modification, .. } if modification == "examplemod"
        ));
        assert!(error.to_string().contains("examplemod"));
    }

    #[tokio::test]
    async fn fetch_changelog_releases_handles_empty_changelog() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/get-modification-changelogs/newmod")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = StoreClient::new(&server.url(), "4.2.47");
        let releases = client.fetch_changelog_releases("newmod").await.unwrap();

        assert!(releases.is_empty());
    }
}
