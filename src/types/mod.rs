//! Core type definitions.

mod host;
mod port;
pub mod target;

pub use host::{AliveHost, HostReport, OpenPort, ScanReport};
pub use port::{Port, PortError, PortSpec};
pub use target::TargetError;
