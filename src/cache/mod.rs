//! Cache module for storing upstream API payloads on disk
//!
//! This module provides a flat, per-key file store together with the fetcher
//! used to repopulate stale or missing entries. Staleness is decided per
//! resource by a `StalenessPolicy` over the decoded payload; there is no
//! indexing, compaction, or multi-writer coordination.

mod fetch;
mod store;

pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use store::{CacheError, FileCache, StalenessPolicy};
