//! Time-bounded file cache for upstream API payloads
//!
//! Maps a logical resource key to one file on disk holding the raw upstream
//! payload bytes. Staleness is decided per resource by a `StalenessPolicy`
//! over the decoded value, because the freshness signal lives inside the
//! payload (an embedded timestamp for the port-calls feed, presence of
//! records for vessel details) rather than in any wrapper metadata.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::fetch::{Fetch, FetchError};

/// Errors surfaced by cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Entry exists on disk but cannot be decoded. Fatal: refreshing over a
    /// corrupt entry would mask silent data loss, so the caller must decide.
    #[error("cache entry '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    /// Reading or preparing cache storage failed
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Refreshing the entry from upstream failed
    #[error(transparent)]
    Refresh(#[from] FetchError),
}

/// Decides whether a decoded cache entry must be refreshed before use.
///
/// Policies are resource-specific: the port-calls feed compares its embedded
/// "last updated" timestamp against a TTL, vessel details only require the
/// entry to be non-empty. The asymmetry is intentional.
pub trait StalenessPolicy<T> {
    /// Returns true if `value` can no longer be served and must be refetched
    fn is_stale(&self, value: &T, now: DateTime<Utc>) -> bool;
}

/// Outcome of reading one entry from disk
enum ReadOutcome<T> {
    Hit(T),
    Missing,
}

/// Flat, per-key file store for upstream payloads
///
/// Each key maps to `<cache_dir>/<key>.json` containing the raw response
/// bytes as fetched. Entries persist across runs; the directory is created
/// on the first refresh.
#[derive(Debug, Clone)]
pub struct FileCache {
    /// Directory where cache entries are stored
    cache_dir: PathBuf,
}

impl FileCache {
    /// Creates a cache rooted at the given directory
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path of the entry file for the given key
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Reads and decodes one entry. A missing file is a plain miss; any
    /// other failure propagates.
    fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Result<ReadOutcome<T>, CacheError> {
        let bytes = match fs::read(self.entry_path(key)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ReadOutcome::Missing),
            Err(err) => return Err(err.into()),
        };

        let value = serde_json::from_slice(&bytes).map_err(|source| CacheError::Corrupt {
            key: key.to_string(),
            source,
        })?;

        Ok(ReadOutcome::Hit(value))
    }

    /// Serves the decoded entry for `key`, refreshing it first when the
    /// entry is missing or the policy declares it stale.
    ///
    /// A decode failure on the initial read propagates as `Corrupt` instead
    /// of triggering a refresh. After a refresh, the re-read value is
    /// returned as-is (no second staleness check), and any failure at that
    /// point is fatal.
    pub async fn fetch_or_refresh<T, P, F>(
        &self,
        key: &str,
        url: &str,
        policy: &P,
        fetcher: &F,
        now: DateTime<Utc>,
    ) -> Result<T, CacheError>
    where
        T: DeserializeOwned,
        P: StalenessPolicy<T>,
        F: Fetch,
    {
        match self.read_entry::<T>(key)? {
            ReadOutcome::Hit(value) if !policy.is_stale(&value, now) => return Ok(value),
            ReadOutcome::Hit(_) | ReadOutcome::Missing => {}
        }

        self.ensure_dir()?;
        fetcher.fetch(url, &self.entry_path(key)).await?;

        match self.read_entry::<T>(key)? {
            ReadOutcome::Hit(value) => Ok(value),
            ReadOutcome::Missing => Err(CacheError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("cache entry '{}' vanished after refresh", key),
            ))),
        }
    }
}
