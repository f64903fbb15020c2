//! Remote fetcher for repopulating cache entries
//!
//! Performs a single GET against the upstream API and streams the response
//! body straight into the cache entry's file. There is no retry or backoff;
//! any transport or storage failure is surfaced verbatim to the caller.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;

/// Errors that can occur while retrieving a resource from the upstream API
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or the server returned a non-success status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing the response body to the cache entry failed
    #[error("failed to write cache entry: {0}")]
    Io(#[from] std::io::Error),
}

/// A source of fresh bytes for a cache entry.
///
/// The cache invokes this on a miss or stale entry; tests substitute canned
/// responses instead of the live API.
pub trait Fetch {
    /// Retrieves `url` and persists the raw response body to `dest`.
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
    ) -> impl std::future::Future<Output = Result<(), FetchError>> + Send;
}

/// Fetcher backed by a real HTTP client
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a new HttpFetcher with a default reqwest client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        log::info!("Downloading {} into {}", url, dest.display());

        let response = self.client.get(url).send().await?.error_for_status()?;

        // Stream the body to disk chunk by chunk; no intermediate buffering
        // of the whole payload.
        let mut file = File::create(dest)?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_to_unwritable_path_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let fetcher = StubFetcher {
            body: "payload".to_string(),
        };

        // Destination inside a directory that doesn't exist
        let dest = temp_dir.path().join("missing").join("entry.json");
        let result = fetcher.fetch("http://example.invalid/feed", &dest).await;

        assert!(matches!(result, Err(FetchError::Io(_))));
    }

    #[tokio::test]
    async fn test_stub_fetch_writes_body_verbatim() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let fetcher = StubFetcher {
            body: r#"{"ok":true}"#.to_string(),
        };

        let dest = temp_dir.path().join("entry.json");
        fetcher
            .fetch("http://example.invalid/feed", &dest)
            .await
            .expect("Fetch should succeed");

        let written = std::fs::read_to_string(&dest).expect("Should read entry");
        assert_eq!(written, r#"{"ok":true}"#);
    }

    /// Minimal Fetch implementation writing a fixed body
    struct StubFetcher {
        body: String,
    }

    impl Fetch for StubFetcher {
        async fn fetch(&self, _url: &str, dest: &Path) -> Result<(), FetchError> {
            std::fs::write(dest, &self.body)?;
            Ok(())
        }
    }
}
