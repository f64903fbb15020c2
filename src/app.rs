//! Report assembly
//!
//! Runs the full pipeline for one port: load the port-calls payload through
//! the cache, derive and trim the event timeline, then enrich each event
//! with vessel details on a best-effort basis. A failed detail lookup never
//! drops the event row; it is logged and the row keeps blank details.

use chrono::{DateTime, Utc};

use crate::cache::{CacheError, Fetch};
use crate::data::{derive_events, discard_stale, DigitrafficClient, PortEvent, VesselDetails};

/// One line of the final report: an event and, when the lookup succeeded,
/// the vessel's descriptive record
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub event: PortEvent,
    pub details: Option<VesselDetails>,
}

/// The assembled report for one port
#[derive(Debug, Clone)]
pub struct PortReport {
    /// "Data as of" timestamp from the upstream feed
    pub updated: DateTime<Utc>,
    /// Retained events in chronological order
    pub rows: Vec<ReportRow>,
}

/// Builds the report for `port_code` as of `now`.
///
/// Fails only when the primary port-calls pipeline fails; per-vessel detail
/// lookups degrade to `None` with a logged warning.
pub async fn build_report<F: Fetch>(
    client: &DigitrafficClient<F>,
    port_code: &str,
    now: DateTime<Utc>,
) -> Result<PortReport, CacheError> {
    let port_calls = client.port_calls(now).await?;

    let events = discard_stale(derive_events(&port_calls, port_code), now);

    let mut rows = Vec::with_capacity(events.len());
    for event in events {
        let details = match client
            .vessel_details(event.mmsi, event.imo_lloyds, &event.vessel_name, now)
            .await
        {
            Ok(details) => Some(details),
            Err(err) => {
                log::warn!("No details for {}: {}", event.vessel_name, err);
                None
            }
        };
        rows.push(ReportRow { event, details });
    }

    Ok(PortReport {
        updated: port_calls.port_calls_updated,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FetchError, FileCache};
    use crate::data::digitraffic::{PORT_CALLS_URL, VESSEL_DETAILS_URL};
    use crate::data::EventKind;
    use chrono::Duration;
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;

    struct StubFetcher {
        responses: HashMap<String, String>,
    }

    impl Fetch for StubFetcher {
        async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
            let body = self.responses.get(url).ok_or_else(|| {
                FetchError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no stub response for {}", url),
                ))
            })?;
            std::fs::write(dest, body)?;
            Ok(())
        }
    }

    fn client_with(
        responses: &[(String, String)],
    ) -> (DigitrafficClient<StubFetcher>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = FileCache::new(temp_dir.path().to_path_buf());
        let fetcher = StubFetcher {
            responses: responses.iter().cloned().collect(),
        };
        (DigitrafficClient::with_fetcher(cache, fetcher), temp_dir)
    }

    fn feed_body(now: DateTime<Utc>) -> String {
        let eta = (now + Duration::hours(1)).to_rfc3339();
        let etd = (now + Duration::hours(5)).to_rfc3339();
        format!(
            r#"{{"portCallsUpdated": "{}", "portCalls": [
                {{"portToVisit": "FIKOK", "vesselName": "AURORA", "mmsi": 230123456, "imoLloyds": 0,
                  "PortAreaDetails": [{{"portAreaName": "Kantasatama", "eta": "{}", "etd": "{}"}}]}}
            ]}}"#,
            now.to_rfc3339(),
            eta,
            etd
        )
    }

    #[tokio::test]
    async fn test_report_joins_events_with_details() {
        let now = Utc::now();
        let details_url = format!("{}?mmsi=230123456", VESSEL_DETAILS_URL);
        let (client, _temp_dir) = client_with(&[
            (PORT_CALLS_URL.to_string(), feed_body(now)),
            (
                details_url,
                r#"[{"mmsi": 230123456, "name": "AURORA",
                    "vesselRegistration": {"nationality": "FI"}}]"#
                    .to_string(),
            ),
        ]);

        let report = build_report(&client, "FIKOK", now)
            .await
            .expect("Report should build");

        assert_eq!(report.updated, now);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].event.kind, EventKind::Arrival);
        assert_eq!(report.rows[1].event.kind, EventKind::Departure);
        for row in &report.rows {
            let details = row.details.as_ref().expect("Details should be present");
            assert_eq!(details.vessel_registration.nationality, "FI");
        }
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_event_row() {
        let now = Utc::now();
        let details_url = format!("{}?mmsi=230123456", VESSEL_DETAILS_URL);
        // Lookup returns an empty array: soft failure.
        let (client, _temp_dir) = client_with(&[
            (PORT_CALLS_URL.to_string(), feed_body(now)),
            (details_url, "[]".to_string()),
        ]);

        let report = build_report(&client, "FIKOK", now)
            .await
            .expect("Report should still build");

        assert_eq!(report.rows.len(), 2, "Rows survive a failed lookup");
        assert!(report.rows.iter().all(|r| r.details.is_none()));
    }

    #[tokio::test]
    async fn test_unreachable_details_feed_keeps_event_rows() {
        let now = Utc::now();
        // No stub for the details URL at all: transport failure per lookup.
        let (client, _temp_dir) =
            client_with(&[(PORT_CALLS_URL.to_string(), feed_body(now))]);

        let report = build_report(&client, "FIKOK", now)
            .await
            .expect("Primary pipeline should not be affected");

        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|r| r.details.is_none()));
    }

    #[tokio::test]
    async fn test_unknown_port_yields_empty_report() {
        let now = Utc::now();
        let (client, _temp_dir) =
            client_with(&[(PORT_CALLS_URL.to_string(), feed_body(now))]);

        let report = build_report(&client, "FIHEL", now)
            .await
            .expect("Report should build");
        assert!(report.rows.is_empty());
        assert_eq!(report.updated, now);
    }

    #[tokio::test]
    async fn test_port_calls_failure_aborts_report() {
        let now = Utc::now();
        // No stub for the port-calls feed: the primary pipeline fails.
        let (client, _temp_dir) = client_with(&[]);

        let result = build_report(&client, "FIKOK", now).await;
        assert!(matches!(result, Err(CacheError::Refresh(_))));
    }
}
