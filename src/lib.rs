//! # Netsweep - Concurrent Subnet Host and Port Scanner
//!
//! Netsweep discovers live hosts on an IPv4 subnet and enumerates open
//! TCP ports on each discovered host, labeling well-known services.
//!
//! ## Features
//!
//! - **Host Discovery**: liveness probing via the system ping command
//! - **TCP Port Scanning**: timeout-bounded connect scans, no privileges needed
//! - **Bounded Concurrency**: a global cap on in-flight probes per phase
//! - **Service Labels**: well-known port to service name mapping
//! - **Hostname Annotation**: best-effort reverse DNS on discovered hosts
//! - **Multiple Output Formats**: plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use netsweep::scanner::{NetworkScanner, ScanRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let scanner = NetworkScanner::new();
//!     let request = ScanRequest::new("192.168.1.0/24").hosts_only();
//!
//!     let report = scanner.scan(&request).await.unwrap();
//!     println!("{} hosts up", report.alive_count());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Core type definitions (ports, targets, reports)
//! - [`probe`] - Liveness and TCP connect probers
//! - [`scanner`] - The concurrent probing engine
//! - [`services`] - Well-known port to service name table
//! - [`resolve`] - Best-effort reverse DNS annotation
//! - [`output`] - Output formatting utilities
//! - [`error`] - Error types

pub mod cli;
pub mod error;
pub mod output;
pub mod probe;
pub mod resolve;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{ScanError, ScanResult};
pub use probe::{LivenessProbe, PortProber, PortStatus, ProbeError, SystemPing};
pub use scanner::{CancelToken, NetworkScanner, ScanRequest};
pub use types::{AliveHost, HostReport, OpenPort, Port, PortSpec, ScanReport};
