//! TCP connect probing.
//!
//! Determines whether a single (address, port) pair accepts a TCP
//! connection within a timeout. The connection is closed immediately on
//! success; no banner grabbing, no data exchange.

use crate::types::Port;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Outcome of probing one port.
///
/// Connection refused, timeout, and network unreachable all collapse to
/// `Closed`; the distinction is only visible at trace log level. This
/// matches the minimal-footprint intent of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus {
    Open,
    Closed,
}

impl PortStatus {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Probes TCP ports with a fixed per-connection timeout.
#[derive(Debug, Clone, Copy)]
pub struct PortProber {
    timeout: Duration,
}

impl PortProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Attempt one TCP connect. Opens and closes exactly one socket.
    pub async fn probe(&self, addr: Ipv4Addr, port: Port) -> PortStatus {
        let sockaddr = SocketAddr::from((addr, port.as_u16()));

        match timeout(self.timeout, TcpStream::connect(sockaddr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                PortStatus::Open
            }
            Ok(Err(e)) => {
                trace!(%addr, %port, error = %e, "connect failed");
                PortStatus::Closed
            }
            Err(_) => {
                trace!(%addr, %port, "connect timed out");
                PortStatus::Closed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_open_port_detected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        let prober = PortProber::new(Duration::from_millis(500));
        let status = prober.probe(Ipv4Addr::LOCALHOST, port).await;
        assert_eq!(status, PortStatus::Open);
    }

    #[tokio::test]
    async fn test_closed_port_detected() {
        // Bind a listener, note its port, and drop it so the port is free
        // but almost certainly closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        drop(listener);

        let prober = PortProber::new(Duration::from_millis(500));
        let status = prober.probe(Ipv4Addr::LOCALHOST, port).await;
        assert_eq!(status, PortStatus::Closed);
    }

    #[tokio::test]
    async fn test_timeout_reports_closed() {
        let prober = PortProber::new(Duration::from_millis(100));
        // Non-routable address: the connect attempt can only time out.
        let status = prober
            .probe(Ipv4Addr::new(192, 0, 2, 1), Port::new(80).unwrap())
            .await;
        assert_eq!(status, PortStatus::Closed);
    }
}
