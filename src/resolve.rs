//! Best-effort reverse DNS annotation of discovered hosts.
//!
//! A missing PTR record, a slow resolver, or any lookup failure simply
//! yields `None`; hostname decoration never fails a scan.

use futures::future::join_all;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, trace};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Upper bound on a single PTR lookup.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Build a resolver from the system configuration.
///
/// PTR records for RFC1918 subnets usually exist only on the local
/// resolver, so /etc/resolv.conf is preferred; a public-DNS fallback
/// covers hosts without a readable system configuration.
fn system_resolver() -> TokioAsyncResolver {
    TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
        debug!(error = %e, "no usable system resolver config; falling back to defaults");
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    })
}

async fn lookup(resolver: &TokioAsyncResolver, addr: Ipv4Addr) -> Option<String> {
    match timeout(LOOKUP_TIMEOUT, resolver.reverse_lookup(IpAddr::V4(addr))).await {
        Ok(Ok(response)) => response
            .iter()
            .next()
            .map(|name| name.to_string().trim_end_matches('.').to_string()),
        Ok(Err(e)) => {
            trace!(%addr, error = %e, "reverse lookup failed");
            None
        }
        Err(_) => {
            trace!(%addr, "reverse lookup timed out");
            None
        }
    }
}

/// Look up the hostname for one address.
pub async fn reverse_lookup(addr: Ipv4Addr) -> Option<String> {
    lookup(&system_resolver(), addr).await
}

/// Resolve hostnames for a batch of addresses concurrently.
///
/// One resolver is built up front and shared by every lookup. The
/// returned vector is index-aligned with `addrs`.
pub async fn reverse_lookup_all(addrs: &[Ipv4Addr]) -> Vec<Option<String>> {
    let resolver = system_resolver();
    join_all(addrs.iter().map(|&addr| lookup(&resolver, addr))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolver_construction_never_panics() {
        // Falls back to default upstreams when the system config is
        // missing or unreadable.
        let _resolver = system_resolver();
    }

    #[tokio::test]
    async fn test_lookup_failure_is_none() {
        // TEST-NET-1 has no PTR record; failure must yield None, not panic.
        let name = reverse_lookup(Ipv4Addr::new(192, 0, 2, 1)).await;
        if let Some(name) = name {
            assert!(!name.is_empty());
        }
    }

    #[tokio::test]
    async fn test_batch_is_index_aligned() {
        let addrs = [Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2)];
        let names = reverse_lookup_all(&addrs).await;
        assert_eq!(names.len(), addrs.len());
    }
}
