//! Result types produced by a scan.

use crate::types::Port;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// A host confirmed reachable during the liveness phase.
///
/// The hostname is a best-effort reverse DNS annotation; its absence is
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliveHost {
    pub addr: Ipv4Addr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl AliveHost {
    pub fn new(addr: Ipv4Addr) -> Self {
        Self {
            addr,
            hostname: None,
        }
    }

    pub fn with_hostname(mut self, hostname: Option<String>) -> Self {
        self.hostname = hostname;
        self
    }
}

impl fmt::Display for AliveHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hostname {
            Some(name) => write!(f, "{} ({})", self.addr, name),
            None => write!(f, "{}", self.addr),
        }
    }
}

/// An open TCP port together with its service label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenPort {
    pub port: Port,
    pub service: String,
}

impl OpenPort {
    pub fn new(port: Port, service: impl Into<String>) -> Self {
        Self {
            port,
            service: service.into(),
        }
    }
}

/// Scan findings for a single alive host.
///
/// `open_ports` is sorted by port number and is empty both for a host
/// with no open ports and in hosts-only mode.
#[derive(Debug, Clone, Serialize)]
pub struct HostReport {
    #[serde(flatten)]
    pub host: AliveHost,
    pub open_ports: Vec<OpenPort>,
}

/// The terminal output of a scan: one complete entry per alive host.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// The network that was scanned, in CIDR notation.
    pub network: String,
    /// When the scan started.
    pub started_at: DateTime<Local>,
    /// Total scan duration in milliseconds.
    pub duration_ms: u64,
    /// Number of candidate addresses probed for liveness.
    pub targets_probed: usize,
    /// Whether port scanning was skipped.
    pub hosts_only: bool,
    /// Per-host findings, sorted by address.
    pub hosts: Vec<HostReport>,
}

impl ScanReport {
    /// Number of alive hosts found.
    pub fn alive_count(&self) -> usize {
        self.hosts.len()
    }

    /// Total open ports across all hosts.
    pub fn open_port_count(&self) -> usize {
        self.hosts.iter().map(|h| h.open_ports.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alive_host_display() {
        let bare = AliveHost::new(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(bare.to_string(), "10.0.0.1");

        let named = bare.with_hostname(Some("router.lan".to_string()));
        assert_eq!(named.to_string(), "10.0.0.1 (router.lan)");
    }

    #[test]
    fn test_report_counts() {
        let report = ScanReport {
            network: "10.0.0.0/30".to_string(),
            started_at: Local::now(),
            duration_ms: 12,
            targets_probed: 2,
            hosts_only: false,
            hosts: vec![HostReport {
                host: AliveHost::new(Ipv4Addr::new(10, 0, 0, 1)),
                open_ports: vec![
                    OpenPort::new(Port::new(22).unwrap(), "SSH"),
                    OpenPort::new(Port::new(80).unwrap(), "HTTP"),
                ],
            }],
        };

        assert_eq!(report.alive_count(), 1);
        assert_eq!(report.open_port_count(), 2);
    }
}
