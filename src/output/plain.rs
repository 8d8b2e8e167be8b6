//! Plain text output formatting.
//!
//! Produces the human-readable scan summary with colors and formatting.

use crate::types::ScanReport;
use console::style;
use std::io::{self, Write};

/// Print a report in human-readable plain text format.
pub fn print_plain(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        style("═══════════════════════════════════════════════════").cyan()
    )?;
    writeln!(
        out,
        "  {} {}",
        style("Scan of").bold(),
        style(&report.network).cyan().bold()
    )?;
    writeln!(
        out,
        "{}",
        style("═══════════════════════════════════════════════════").cyan()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  {} {}",
        style("Started:").bold(),
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(
        out,
        "  {} probed, {} up, completed in {:.2}s",
        style(format!("{} targets", report.targets_probed)).bold(),
        style(format!("{} hosts", report.alive_count())).green().bold(),
        report.duration_ms as f64 / 1000.0
    )?;

    if report.hosts.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", style("No hosts found in the network.").dim())?;
    }

    for entry in &report.hosts {
        writeln!(out)?;
        writeln!(
            out,
            "  {} {}",
            style("Host:").bold(),
            style(entry.host.addr).green().bold()
        )?;
        if let Some(name) = &entry.host.hostname {
            writeln!(out, "  {} {}", style("Hostname:").bold(), name)?;
        }

        if report.hosts_only {
            continue;
        }

        if entry.open_ports.is_empty() {
            writeln!(out, "    {}", style("No open ports found").dim())?;
        } else {
            writeln!(out, "    {}", style("Open ports:").bold())?;
            for open in &entry.open_ports {
                writeln!(
                    out,
                    "    {:>6}/tcp  {}",
                    style(open.port).green(),
                    open.service
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        style("═══════════════════════════════════════════════════").cyan()
    )?;
    writeln!(out)?;

    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
