//! Vessel identity resolution for detail lookups
//!
//! A port call may carry any combination of MMSI, IMO/Lloyds number, and
//! vessel name. Detail lookups pick the best available identifier in a fixed
//! priority order and derive both the cache key and the upstream query
//! parameter from it, so repeated lookups for the same vessel reuse the same
//! cache entry.

use thiserror::Error;

/// Errors from identity resolution
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No usable identity field was present
    #[error("no mmsi, imoLloyds or vessel name available")]
    Unresolved,
}

/// The lookup key chosen for one vessel-details query
///
/// Priority order, first present wins: MMSI, IMO/Lloyds, name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Mmsi(u32),
    ImoLloyds(u32),
    Name(String),
}

impl LookupKey {
    /// Selects the best available identity, or fails when all fields are
    /// absent (0 for the numeric identifiers, empty for the name).
    pub fn resolve(mmsi: u32, imo_lloyds: u32, name: &str) -> Result<Self, IdentityError> {
        if mmsi > 0 {
            Ok(LookupKey::Mmsi(mmsi))
        } else if imo_lloyds > 0 {
            Ok(LookupKey::ImoLloyds(imo_lloyds))
        } else if !name.is_empty() {
            Ok(LookupKey::Name(name.to_string()))
        } else {
            Err(IdentityError::Unresolved)
        }
    }

    /// Query parameter name understood by the vessel-details feed
    pub fn kind(&self) -> &'static str {
        match self {
            LookupKey::Mmsi(_) => "mmsi",
            LookupKey::ImoLloyds(_) => "imo",
            LookupKey::Name(_) => "vesselName",
        }
    }

    /// Query parameter value, escaped for safe inclusion in a URL or a
    /// cache file name
    pub fn value(&self) -> String {
        match self {
            LookupKey::Mmsi(mmsi) => mmsi.to_string(),
            LookupKey::ImoLloyds(imo) => imo.to_string(),
            LookupKey::Name(name) => urlencoding::encode(name).into_owned(),
        }
    }

    /// Cache key for this lookup; deterministic per (kind, value) pair
    pub fn cache_key(&self) -> String {
        format!("vessel-details-{}-{}", self.kind(), self.value())
    }
}
