//! Table rendering for the assembled report
//!
//! Formats the event timeline for the terminal: a "Last update" header from
//! the feed's embedded timestamp, then one row per event. Timestamps are
//! shown in local time, suffixed `(E)` for estimates and `(A)` for recorded
//! actuals. Rows without vessel details keep their descriptive columns
//! blank.

use chrono::Local;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::app::{PortReport, ReportRow};
use crate::data::PortEvent;

/// Display format of event timestamps
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One rendered table row
#[derive(Debug, Tabled)]
struct EventRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Area")]
    area: String,
    #[tabled(rename = "Vessel")]
    vessel: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Type")]
    hull_type: String,
}

/// Formats an event's effective timestamp for display, marking whether it
/// is an estimate or a recorded actual
fn format_event_time(event: &PortEvent) -> String {
    if let Some(actual) = event.actual {
        format!("{} (A)", actual.with_timezone(&Local).format(TIME_FORMAT))
    } else if let Some(estimate) = event.estimate {
        format!("{} (E)", estimate.with_timezone(&Local).format(TIME_FORMAT))
    } else {
        "-".to_string()
    }
}

fn to_row(row: &ReportRow) -> EventRow {
    let (vessel, size, hull_type) = match &row.details {
        Some(details) => (
            format!(
                "{} {}",
                row.event.vessel_name, details.vessel_registration.nationality
            )
            .trim_end()
            .to_string(),
            format!(
                "{:.0}m / {:.0}m",
                details.vessel_dimensions.overall_length.round(),
                details.vessel_dimensions.breadth.round()
            ),
            details.vessel_construction.vessel_type_name.clone(),
        ),
        None => (row.event.vessel_name.clone(), String::new(), String::new()),
    };

    EventRow {
        time: format_event_time(&row.event),
        event: row.event.kind.to_string(),
        area: row.event.port_area.clone(),
        vessel,
        size,
        hull_type,
    }
}

/// Renders the full report: header line plus the event table
pub fn render_report(report: &PortReport) -> String {
    let header = format!(
        "Last update: {}",
        report
            .updated
            .with_timezone(&Local)
            .format(TIME_FORMAT)
    );

    if report.rows.is_empty() {
        return format!("{}\nNo port calls found.\n", header);
    }

    let rows: Vec<EventRow> = report.rows.iter().map(to_row).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::blank())
        .with(Modify::new(Rows::first()).with(Alignment::left()));

    format!("{}\n{}\n", header, table)
}
