//! Event derivation from raw port-call records
//!
//! Turns the nested port-calls payload into a flat, chronologically ordered
//! timeline of arrivals and departures for one port, and trims entries that
//! fell out of the retention window.

use chrono::{DateTime, Duration, Utc};

use super::{EventKind, PortCalls, PortEvent};

/// How long past events stay in the report
const RETENTION_HOURS: i64 = 24;

/// Derives the ordered event timeline for one port.
///
/// Each area visit of each call destined for `port_code` (exact match)
/// yields exactly two events, Arrival then Departure. The result is sorted
/// ascending by effective timestamp with a stable tie-break: events with
/// equal (or absent) timestamps keep their emission order. An unknown port
/// code yields an empty timeline.
pub fn derive_events(port_calls: &PortCalls, port_code: &str) -> Vec<PortEvent> {
    let mut events = Vec::new();

    for call in &port_calls.port_calls {
        if call.port_to_visit != port_code {
            continue;
        }
        for visit in &call.port_area_details {
            events.push(PortEvent {
                kind: EventKind::Arrival,
                vessel_name: call.vessel_name.clone(),
                mmsi: call.mmsi,
                imo_lloyds: call.imo_lloyds,
                port_area: visit.port_area_name.clone(),
                estimate: visit.eta,
                actual: visit.ata,
            });
            events.push(PortEvent {
                kind: EventKind::Departure,
                vessel_name: call.vessel_name.clone(),
                mmsi: call.mmsi,
                imo_lloyds: call.imo_lloyds,
                port_area: visit.port_area_name.clone(),
                estimate: visit.etd,
                actual: visit.atd,
            });
        }
    }

    // Stable sort; None (no timestamp at all) orders before any timestamp.
    events.sort_by_key(|e| e.effective_time());

    events
}

/// Drops events whose effective timestamp is strictly before the retention
/// horizon (`now` minus 24 hours). Events without any timestamp are kept,
/// as are current and future ones. Order is preserved.
pub fn discard_stale(mut events: Vec<PortEvent>, now: DateTime<Utc>) -> Vec<PortEvent> {
    let horizon = now - Duration::hours(RETENTION_HOURS);
    events.retain(|e| match e.effective_time() {
        Some(t) => t >= horizon,
        None => true,
    });
    events
}
