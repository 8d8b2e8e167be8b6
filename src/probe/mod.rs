//! Probing primitives.
//!
//! Two probers live here: [`ping::SystemPing`] answers "is this host up"
//! by delegating to the operating system's ping command, and
//! [`tcp::PortProber`] answers "does this port accept a TCP connection".
//! Both are strictly timeout-bounded; neither retries.

pub mod ping;
pub mod tcp;

pub use ping::{LivenessProbe, SystemPing};
pub use tcp::{PortProber, PortStatus};

use thiserror::Error;

/// Error raised when a probe mechanism itself cannot run.
///
/// This is distinct from a negative probe result: an unreachable host or
/// a closed port is a normal finding, not an error. The orchestrator
/// degrades a setup error to "assume unreachable" and keeps scanning.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("failed to invoke {tool}: {reason}")]
    Setup { tool: &'static str, reason: String },
}
