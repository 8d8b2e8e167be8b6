//! CSV output formatting.

use crate::types::ScanReport;
use std::io;

/// Print a report in CSV format.
///
/// One row per open port; hosts without open ports (and hosts-only
/// scans) still get a row so every discovered host appears.
pub fn print_csv(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["host", "hostname", "port", "service"])?;

    for entry in &report.hosts {
        let host = entry.host.addr.to_string();
        let hostname = entry.host.hostname.as_deref().unwrap_or("");

        if entry.open_ports.is_empty() {
            wtr.write_record([host.as_str(), hostname, "", ""])?;
        } else {
            for open in &entry.open_ports {
                wtr.write_record([
                    host.as_str(),
                    hostname,
                    &open.port.to_string(),
                    &open.service,
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
