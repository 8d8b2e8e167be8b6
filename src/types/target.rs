//! Scan target parsing and host enumeration.
//!
//! Parses IPv4 CIDR notation and expands a network into its usable host
//! addresses. A non-aligned prefix (host bits set) is normalized to the
//! network base rather than rejected, and a bare address is treated as /32.

use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;

/// Maximum number of addresses a single scan may cover.
///
/// Guards against an accidental `/8` sweep; equivalent to a /16.
pub const MAX_SCAN_HOSTS: u64 = 65536;

/// Error type for target parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("invalid IPv4 CIDR notation: {0}")]
    InvalidCidr(String),
    #[error("network too large: {0} addresses (max: {1})")]
    NetworkTooLarge(u64, u64),
}

/// Parse a CIDR string into a normalized IPv4 network.
///
/// Accepts host bits set (`192.168.1.77/24` becomes `192.168.1.0/24`) and
/// bare addresses (`10.0.0.1` becomes `10.0.0.1/32`).
pub fn parse_network(s: &str) -> Result<Ipv4Network, TargetError> {
    let s = s.trim();
    let network: Ipv4Network = s
        .parse()
        .map_err(|_| TargetError::InvalidCidr(s.to_string()))?;

    let total = address_count(&network);
    if total > MAX_SCAN_HOSTS {
        return Err(TargetError::NetworkTooLarge(total, MAX_SCAN_HOSTS));
    }

    // Normalize away any host bits so enumeration starts at the network base.
    Ipv4Network::new(network.network(), network.prefix())
        .map_err(|_| TargetError::InvalidCidr(s.to_string()))
}

/// Total addresses covered by the network, including network/broadcast.
pub fn address_count(network: &Ipv4Network) -> u64 {
    1u64 << (32 - u32::from(network.prefix()))
}

/// Lazily enumerate the usable host addresses of a network.
///
/// For prefixes shorter than /31 the network and broadcast addresses are
/// excluded; /31 yields both addresses and /32 yields the single address.
pub fn usable_hosts(network: Ipv4Network) -> impl Iterator<Item = Ipv4Addr> {
    let skip_edges = network.prefix() < 31;
    let network_addr = network.network();
    let broadcast = network.broadcast();

    network
        .iter()
        .filter(move |addr| !skip_edges || (*addr != network_addr && *addr != broadcast))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(s: &str) -> Vec<Ipv4Addr> {
        usable_hosts(parse_network(s).unwrap()).collect()
    }

    #[test]
    fn test_slash_24_excludes_network_and_broadcast() {
        let hosts = hosts("192.168.1.0/24");
        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts[0], Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(hosts[253], Ipv4Addr::new(192, 168, 1, 254));
    }

    #[test]
    fn test_slash_30_has_two_usable_hosts() {
        let hosts = hosts("10.0.0.0/30");
        assert_eq!(
            hosts,
            vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]
        );
    }

    #[test]
    fn test_slash_31_includes_both_addresses() {
        let hosts = hosts("10.0.0.0/31");
        assert_eq!(
            hosts,
            vec![Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(10, 0, 0, 1)]
        );
    }

    #[test]
    fn test_slash_32_is_single_address() {
        let hosts = hosts("127.0.0.1/32");
        assert_eq!(hosts, vec![Ipv4Addr::new(127, 0, 0, 1)]);
    }

    #[test]
    fn test_bare_address_treated_as_slash_32() {
        let network = parse_network("10.1.2.3").unwrap();
        assert_eq!(network.prefix(), 32);
        assert_eq!(usable_hosts(network).count(), 1);
    }

    #[test]
    fn test_host_bits_normalized() {
        let network = parse_network("192.168.1.77/24").unwrap();
        assert_eq!(network.ip(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(usable_hosts(network).count(), 254);
    }

    #[test]
    fn test_invalid_cidr_rejected() {
        assert!(matches!(
            parse_network("not-a-network"),
            Err(TargetError::InvalidCidr(_))
        ));
        assert!(matches!(
            parse_network("192.168.1.0/33"),
            Err(TargetError::InvalidCidr(_))
        ));
        assert!(matches!(
            parse_network("300.0.0.1/24"),
            Err(TargetError::InvalidCidr(_))
        ));
    }

    #[test]
    fn test_oversized_network_rejected() {
        assert!(matches!(
            parse_network("10.0.0.0/8"),
            Err(TargetError::NetworkTooLarge(_, _))
        ));
        // A /16 is exactly at the limit.
        assert!(parse_network("10.0.0.0/16").is_ok());
    }
}
