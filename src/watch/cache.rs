//! File-per-modification JSON cache of the last seen release state

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Last seen state of one modification.
///
/// Persisted with camelCase keys (`latestVersion`, `released`) to stay
/// compatible with existing cache files. `released` only ever flips
/// false to true while `latest_version` is unchanged; a version change
/// resets it to the new version's release status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub latest_version: String,
    pub released: bool,
}

/// Cache directory holding one `<modification>.json` file per watched
/// modification. Records are never deleted, only created and overwritten.
pub struct ModCache {
    dir: PathBuf,
}

impl ModCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, modification: &str) -> PathBuf {
        self.dir.join(format!("{modification}.json"))
    }

    pub fn load(&self, modification: &str) -> Result<Option<CacheRecord>, CacheError> {
        let path = self.record_path(modification);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn store(&self, modification: &str, record: &CacheRecord) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.record_path(modification);
        fs::write(&path, serde_json::to_string(record)?)?;
        debug!("cached state of {modification} at {path:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(version: &str, released: bool) -> CacheRecord {
        CacheRecord {
            latest_version: version.to_string(),
            released,
        }
    }

    #[test]
    fn load_returns_none_for_unknown_modification() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ModCache::new(temp_dir.path());

        assert_eq!(cache.load("examplemod").unwrap(), None);
    }

    #[test]
    fn store_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ModCache::new(temp_dir.path());

        cache.store("examplemod", &record("1.1", true)).unwrap();

        assert_eq!(
            cache.load("examplemod").unwrap(),
            Some(record("1.1", true))
        );
    }

    #[test]
    fn store_overwrites_existing_record() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ModCache::new(temp_dir.path());

        cache.store("examplemod", &record("1.1", true)).unwrap();
        cache.store("examplemod", &record("1.2", false)).unwrap();

        assert_eq!(
            cache.load("examplemod").unwrap(),
            Some(record("1.2", false))
        );
    }

    #[test]
    fn records_are_persisted_with_camel_case_keys() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ModCache::new(temp_dir.path());

        cache.store("examplemod", &record("1.1", false)).unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("examplemod.json")).unwrap();
        assert_eq!(raw, r#"{"latestVersion":"1.1","released":false}"#);
    }

    #[test]
    fn store_creates_missing_cache_directory() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ModCache::new(temp_dir.path().join("nested").join("cache"));

        cache.store("examplemod", &record("1.0", false)).unwrap();

        assert!(cache.load("examplemod").unwrap().is_some());
    }

    #[test]
    fn load_fails_on_corrupt_record() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ModCache::new(temp_dir.path());

        std::fs::write(temp_dir.path().join("examplemod.json"), "not json").unwrap();

        assert!(matches!(
            cache.load("examplemod"),
            Err(CacheError::Serialization(_))
        ));
    }
}
