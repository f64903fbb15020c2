//! Digitraffic marine feed client
//!
//! Wires the file cache and fetcher to the two Fintraffic endpoints: the
//! port-calls feed and the vessel-details metadata feed. Each resource
//! carries its own staleness policy; the port-calls feed expires on its
//! embedded timestamp while vessel details are kept for as long as the
//! entry holds a record, since vessel attributes rarely change.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use super::identity::{IdentityError, LookupKey};
use super::{PortCalls, VesselDetails};
use crate::cache::{CacheError, Fetch, FileCache, HttpFetcher, StalenessPolicy};

/// Port-calls feed endpoint
pub const PORT_CALLS_URL: &str = "https://meri.digitraffic.fi/api/v1/port-calls";

/// Vessel-details feed endpoint; takes one query parameter
pub const VESSEL_DETAILS_URL: &str = "https://meri.digitraffic.fi/api/v1/metadata/vessel-details";

/// Cache key of the port-calls feed
const PORT_CALLS_KEY: &str = "portcalls";

/// TTL of the port-calls feed relative to its embedded timestamp
const PORT_CALLS_TTL_HOURS: i64 = 1;

/// Errors from a single vessel-details lookup
///
/// These are soft failures at the report level: the caller substitutes
/// empty details and keeps the event row.
#[derive(Debug, Error)]
pub enum VesselLookupError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The feed returned zero or more than one record for the lookup key
    #[error("expected 1 vessel details record, got {count}")]
    Cardinality { count: usize },
}

/// Staleness policy of the port-calls feed: the embedded "last updated"
/// timestamp must be within the TTL, and the payload must hold records.
struct PortCallsFreshness {
    max_age: Duration,
}

impl StalenessPolicy<PortCalls> for PortCallsFreshness {
    fn is_stale(&self, value: &PortCalls, now: DateTime<Utc>) -> bool {
        value.port_calls.is_empty() || value.port_calls_updated < now - self.max_age
    }
}

/// Staleness policy of vessel details: any non-empty entry is served, with
/// no time bound.
struct VesselEntryPresent;

impl StalenessPolicy<Vec<VesselDetails>> for VesselEntryPresent {
    fn is_stale(&self, value: &Vec<VesselDetails>, _now: DateTime<Utc>) -> bool {
        value.is_empty()
    }
}

/// Client for the Digitraffic marine feeds, backed by the file cache
#[derive(Debug)]
pub struct DigitrafficClient<F = HttpFetcher> {
    cache: FileCache,
    fetcher: F,
}

impl DigitrafficClient<HttpFetcher> {
    /// Creates a client fetching from the live API
    pub fn new(cache: FileCache) -> Self {
        Self::with_fetcher(cache, HttpFetcher::new())
    }
}

impl<F: Fetch> DigitrafficClient<F> {
    /// Creates a client with a custom fetcher (for testing)
    pub fn with_fetcher(cache: FileCache, fetcher: F) -> Self {
        Self { cache, fetcher }
    }

    /// Returns the current port-calls payload, refreshing the cached copy
    /// when its embedded timestamp is older than one hour.
    pub async fn port_calls(&self, now: DateTime<Utc>) -> Result<PortCalls, CacheError> {
        let policy = PortCallsFreshness {
            max_age: Duration::hours(PORT_CALLS_TTL_HOURS),
        };
        self.cache
            .fetch_or_refresh(PORT_CALLS_KEY, PORT_CALLS_URL, &policy, &self.fetcher, now)
            .await
    }

    /// Looks up the details of one vessel by the best available identity.
    ///
    /// The feed returns a JSON array that must hold exactly one record;
    /// anything else is a `Cardinality` error.
    pub async fn vessel_details(
        &self,
        mmsi: u32,
        imo_lloyds: u32,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<VesselDetails, VesselLookupError> {
        let key = LookupKey::resolve(mmsi, imo_lloyds, name)?;
        let url = format!("{}?{}={}", VESSEL_DETAILS_URL, key.kind(), key.value());

        let mut records: Vec<VesselDetails> = self
            .cache
            .fetch_or_refresh(&key.cache_key(), &url, &VesselEntryPresent, &self.fetcher, now)
            .await?;

        if records.len() != 1 {
            return Err(VesselLookupError::Cardinality {
                count: records.len(),
            });
        }
        Ok(records.remove(0))
    }
}
