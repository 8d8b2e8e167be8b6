//! Host liveness probing via the system ping command.
//!
//! Raw ICMP sockets require elevated privileges, so reachability checks
//! are delegated to the platform's `ping` binary. The mechanism sits
//! behind the [`LivenessProbe`] trait so tests (or a future privileged
//! ICMP implementation) can swap it out.

use crate::probe::ProbeError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::trace;

/// Extra time allowed for process startup and teardown beyond the
/// reachability timeout handed to ping itself.
const GRACE: Duration = Duration::from_secs(1);

/// A single-method capability deciding whether one address is reachable.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// Probe one address, bounded by `timeout` (plus a small fixed grace).
    ///
    /// An unreachable host is a normal `Ok(false)`; `Err` means the probe
    /// mechanism itself could not be invoked.
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> Result<bool, ProbeError>;
}

/// Liveness prober that shells out to the OS ping command.
///
/// Sends a single echo request with the platform-specific timeout flag
/// and interprets the exit status as reachability.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPing;

impl SystemPing {
    pub fn new() -> Self {
        Self
    }

    fn command(addr: Ipv4Addr, timeout: Duration) -> Command {
        // ping's own timeout flags take whole seconds (milliseconds on
        // Windows), so sub-second timeouts round up to one unit.
        let secs = timeout.as_secs().max(1).to_string();

        let mut cmd = Command::new("ping");
        #[cfg(target_os = "windows")]
        cmd.args(["-n", "1", "-w", &timeout.as_millis().max(1).to_string()]);
        #[cfg(target_os = "macos")]
        cmd.args(["-c", "1", "-t", &secs]);
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        cmd.args(["-c", "1", "-W", &secs]);

        cmd.arg(addr.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

#[async_trait]
impl LivenessProbe for SystemPing {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> Result<bool, ProbeError> {
        let mut cmd = Self::command(addr, timeout);

        // ping enforces its own deadline; the outer timeout is a backstop
        // so a wedged subprocess can never stall the scan.
        match tokio::time::timeout(timeout + GRACE, cmd.output()).await {
            Ok(Ok(output)) => {
                trace!(%addr, success = output.status.success(), "ping finished");
                Ok(output.status.success())
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => Err(ProbeError::Setup {
                tool: "ping",
                reason: "command not found".to_string(),
            }),
            Ok(Err(e)) => Err(ProbeError::Setup {
                tool: "ping",
                reason: e.to_string(),
            }),
            Err(_) => {
                trace!(%addr, "ping exceeded deadline");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_shape() {
        let cmd = SystemPing::command(Ipv4Addr::new(10, 0, 0, 1), Duration::from_millis(250));
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "ping");

        let args: Vec<String> = std_cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.contains(&"10.0.0.1".to_string()));
        // Sub-second timeouts round up to one whole unit for ping's flag.
        assert!(args.contains(&"1".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_address_is_negative_not_error() {
        let prober = SystemPing::new();
        // TEST-NET-1 (RFC 5737) is guaranteed non-routable.
        match prober
            .probe(Ipv4Addr::new(192, 0, 2, 1), Duration::from_secs(1))
            .await
        {
            Ok(alive) => assert!(!alive),
            // No ping binary available; the setup error path is exercised
            // in the orchestrator tests instead.
            Err(ProbeError::Setup { .. }) => {}
        }
    }

    #[tokio::test]
    async fn test_unreachable_probe_is_idempotent() {
        let prober = SystemPing::new();
        let addr = Ipv4Addr::new(192, 0, 2, 1);
        let first = prober.probe(addr, Duration::from_secs(1)).await;
        let second = prober.probe(addr, Duration::from_secs(1)).await;
        if let (Ok(first), Ok(second)) = (first, second) {
            assert_eq!(first, second);
        }
    }
}
