//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortSpec` parses the port expression supplied on the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated TCP port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw u16 values. Port 0
/// is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// The set of TCP ports to probe.
///
/// Parsed from a comma-separated list of port numbers (`"80,443,8080"`),
/// an inclusive range (`"1-1000"`), or a mix of both (`"22,8000-8010"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortSpec {
    ports: Vec<Port>,
}

impl PortSpec {
    /// Create an empty port specification.
    pub const fn new() -> Self {
        Self { ports: Vec::new() }
    }

    /// Add a single port.
    pub fn add_port(&mut self, port: Port) {
        self.ports.push(port);
    }

    /// Add every port in an inclusive range. Both bounds must already be
    /// validated; `start <= end` is the caller's responsibility.
    fn add_range(&mut self, start: Port, end: Port) {
        for p in start.as_u16()..=end.as_u16() {
            self.ports.push(Port(p));
        }
    }

    /// Get all ports as a sorted, deduplicated vector.
    pub fn to_ports(&self) -> Vec<Port> {
        let mut ports = self.ports.clone();
        ports.sort_unstable();
        ports.dedup();
        ports
    }

    /// Get the total number of unique ports.
    pub fn count(&self) -> usize {
        self.to_ports().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut spec = Self::new();

        for part in s.split(',') {
            let part = part.trim();
            if let Some((lo, hi)) = part.split_once('-') {
                let start: u16 = lo
                    .trim()
                    .parse()
                    .map_err(|_| PortError::InvalidFormat(lo.to_string()))?;
                let end: u16 = hi
                    .trim()
                    .parse()
                    .map_err(|_| PortError::InvalidFormat(hi.to_string()))?;

                let start = Port::new(start).ok_or(PortError::OutOfRange(start))?;
                let end = Port::new(end).ok_or(PortError::OutOfRange(end))?;
                if start > end {
                    return Err(PortError::InvalidRange(start.as_u16(), end.as_u16()));
                }
                spec.add_range(start, end);
            } else {
                let port: u16 = part
                    .parse()
                    .map_err(|_| PortError::InvalidFormat(part.to_string()))?;
                let port = Port::new(port).ok_or(PortError::OutOfRange(port))?;
                spec.add_port(port);
            }
        }

        Ok(spec)
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.to_ports().iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(80).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_explicit_list() {
        let spec: PortSpec = "80,443,8080".parse().unwrap();
        let ports: Vec<u16> = spec.to_ports().iter().map(|p| p.as_u16()).collect();
        assert_eq!(ports, vec![80, 443, 8080]);
    }

    #[test]
    fn test_range() {
        let spec: PortSpec = "1-100".parse().unwrap();
        assert_eq!(spec.count(), 100);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = "80-79".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, PortError::InvalidRange(80, 79)));
    }

    #[test]
    fn test_port_zero_rejected() {
        // Port 0 is defined as invalid, so a range starting at 0 fails.
        assert!(matches!(
            "0-65535".parse::<PortSpec>(),
            Err(PortError::OutOfRange(0))
        ));
        assert!(matches!(
            "0".parse::<PortSpec>(),
            Err(PortError::OutOfRange(0))
        ));
    }

    #[test]
    fn test_non_integer_token_rejected() {
        assert!(matches!(
            "80,http".parse::<PortSpec>(),
            Err(PortError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!("".parse::<PortSpec>(), Err(PortError::Empty)));
        assert!(matches!("  ".parse::<PortSpec>(), Err(PortError::Empty)));
    }

    #[test]
    fn test_dedup() {
        let spec: PortSpec = "80,80,443,80".parse().unwrap();
        assert_eq!(spec.count(), 2);
    }

    #[test]
    fn test_mixed_list_and_range() {
        let spec: PortSpec = "22,80,443,8000-8010".parse().unwrap();
        assert_eq!(spec.count(), 14);
    }
}
