//! Core data models for the port call reporter
//!
//! Mirrors the Fintraffic Digitraffic marine feeds
//! (<https://meri.digitraffic.fi/swagger/>): the port-calls feed and the
//! vessel-details metadata feed, plus the derived `PortEvent` timeline
//! entries computed from them.

pub mod digitraffic;
pub mod events;
pub mod identity;

pub use digitraffic::{DigitrafficClient, VesselLookupError};
pub use events::{derive_events, discard_stale};
pub use identity::{IdentityError, LookupKey};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level payload of the port-calls feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortCalls {
    /// When the upstream feed was last updated
    pub port_calls_updated: DateTime<Utc>,
    /// All current call records, across every port
    #[serde(default)]
    pub port_calls: Vec<PortCall>,
}

/// One vessel's call at a port, possibly spanning several area visits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortCall {
    /// Destination port code, e.g. "FIKOK"
    #[serde(default)]
    pub port_to_visit: String,
    /// Vessel name as reported by the feed
    #[serde(default)]
    pub vessel_name: String,
    /// Maritime Mobile Service Identity; 0 when not reported
    #[serde(default)]
    pub mmsi: u32,
    /// IMO/Lloyds registry number; 0 when not reported
    #[serde(default)]
    pub imo_lloyds: u32,
    /// Berth/area visits within this call. The feed spells this field with
    /// a leading capital.
    #[serde(rename = "PortAreaDetails", default)]
    pub port_area_details: Vec<PortAreaVisit>,
}

/// One berth/area visit within a port call
///
/// All timestamps are normalized to UTC on deserialization; a missing or
/// null value means the event has not (yet) occurred.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortAreaVisit {
    /// Name of the berth/area
    #[serde(default)]
    pub port_area_name: String,
    /// Estimated time of arrival
    #[serde(default)]
    pub eta: Option<DateTime<Utc>>,
    /// Actual time of arrival
    #[serde(default)]
    pub ata: Option<DateTime<Utc>>,
    /// Estimated time of departure
    #[serde(default)]
    pub etd: Option<DateTime<Utc>>,
    /// Actual time of departure
    #[serde(default)]
    pub atd: Option<DateTime<Utc>>,
}

/// Kind of a derived port event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Arrival,
    Departure,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Arrival => write!(f, "Arrival"),
            EventKind::Departure => write!(f, "Departure"),
        }
    }
}

/// A derived arrival or departure occurrence for one area visit
///
/// Ephemeral: recomputed from the port-calls payload on every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortEvent {
    /// Arrival or Departure
    pub kind: EventKind,
    /// Vessel name from the parent call
    pub vessel_name: String,
    /// MMSI from the parent call; 0 when absent
    pub mmsi: u32,
    /// IMO/Lloyds number from the parent call; 0 when absent
    pub imo_lloyds: u32,
    /// Berth/area name
    pub port_area: String,
    /// Estimated time of the event
    pub estimate: Option<DateTime<Utc>>,
    /// Actual time of the event, once it has occurred
    pub actual: Option<DateTime<Utc>>,
}

impl PortEvent {
    /// Effective timestamp: the actual time once recorded, otherwise the
    /// estimate. `None` when the feed reported neither.
    pub fn effective_time(&self) -> Option<DateTime<Utc>> {
        self.actual.or(self.estimate)
    }
}

/// Descriptive vessel record from the vessel-details metadata feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselDetails {
    /// Maritime Mobile Service Identity
    #[serde(default)]
    pub mmsi: u32,
    /// Vessel name
    #[serde(default)]
    pub name: String,
    /// Construction attributes (hull type)
    #[serde(default)]
    pub vessel_construction: VesselConstruction,
    /// Physical dimensions in meters
    #[serde(default)]
    pub vessel_dimensions: VesselDimensions,
    /// Registry information
    #[serde(default)]
    pub vessel_registration: VesselRegistration,
}

/// Construction attributes of a vessel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselConstruction {
    #[serde(default)]
    pub vessel_type_code: u32,
    #[serde(default)]
    pub vessel_type_name: String,
}

/// Physical dimensions of a vessel, in meters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselDimensions {
    #[serde(default)]
    pub overall_length: f64,
    #[serde(default)]
    pub breadth: f64,
}

/// Registry information of a vessel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselRegistration {
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub port_of_registry: String,
}
