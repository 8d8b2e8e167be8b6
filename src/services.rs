//! Service detection based on well-known port numbers.
//!
//! Provides the static mapping from TCP port numbers to service names
//! used both for labeling open ports and as the default probe set.

use crate::types::Port;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Static map of well-known ports to service names.
///
/// Initialized once at first use and never mutated afterwards, so it is
/// safe to read from any number of concurrent probe tasks.
static WELL_KNOWN_PORTS: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(21, "FTP");
    m.insert(22, "SSH");
    m.insert(23, "Telnet");
    m.insert(25, "SMTP");
    m.insert(53, "DNS");
    m.insert(80, "HTTP");
    m.insert(110, "POP3");
    m.insert(143, "IMAP");
    m.insert(443, "HTTPS");
    m.insert(993, "IMAPS");
    m.insert(995, "POP3S");
    m.insert(1433, "MSSQL");
    m.insert(3306, "MySQL");
    m.insert(3389, "RDP");
    m.insert(5432, "PostgreSQL");
    m.insert(5900, "VNC");
    m.insert(6379, "Redis");
    m.insert(8080, "HTTP-Proxy");
    m.insert(8443, "HTTPS-Alt");

    m
});

/// Look up the service name for a port.
///
/// Returns `None` if the port is not in the well-known table.
pub fn service_name(port: u16) -> Option<&'static str> {
    WELL_KNOWN_PORTS.get(&port).copied()
}

/// Get the display label for the service on a port.
///
/// Returns `"Unknown"` for ports not in the well-known table.
pub fn service_label(port: u16) -> &'static str {
    service_name(port).unwrap_or("Unknown")
}

/// The default probe set: every port in the well-known table, sorted.
pub fn default_ports() -> Vec<Port> {
    let mut ports: Vec<Port> = WELL_KNOWN_PORTS
        .keys()
        .filter_map(|&p| Port::new(p))
        .collect();
    ports.sort_unstable();
    ports
}
