//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::error::ScanResult;
use crate::output::OutputFormat;
use crate::scanner::{ScanRequest, DEFAULT_CONCURRENCY};
use crate::types::PortSpec;
use clap::Parser;
use std::time::Duration;

/// A concurrent IPv4 host discovery and TCP port scanner.
#[derive(Parser, Debug)]
#[command(name = "netsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discover live hosts on a subnet and scan their TCP ports", long_about = None)]
pub struct Args {
    /// Network to scan in CIDR notation (e.g. 192.168.1.0/24)
    #[arg(value_name = "NETWORK")]
    pub network: String,

    /// Ports to probe (e.g. "80,443,8080" or "1-1000"); defaults to the
    /// well-known service ports
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Probe timeout in seconds
    #[arg(short, long, default_value = "1.0", value_parser = parse_timeout)]
    pub timeout: f64,

    /// Only discover live hosts, skip port scanning
    #[arg(long)]
    pub hosts_only: bool,

    /// Maximum number of concurrent probes
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Skip reverse DNS lookups on discovered hosts
    #[arg(long)]
    pub no_dns: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the engine request, validating the port expression.
    ///
    /// The CIDR itself is validated by the engine when the scan starts.
    pub fn to_request(&self) -> ScanResult<ScanRequest> {
        let mut request = ScanRequest::new(&self.network)
            .with_timeout(Duration::from_secs_f64(self.timeout))
            .with_concurrency(self.concurrency);

        if let Some(ports) = &self.ports {
            let spec: PortSpec = ports.parse()?;
            request = request.with_ports(spec);
        }
        if self.hosts_only {
            request = request.hosts_only();
        }
        if self.no_dns {
            request = request.without_dns();
        }
        // A progress bar would corrupt machine-readable output.
        if self.output == OutputFormat::Plain {
            request = request.with_progress();
        }

        Ok(request)
    }
}

fn parse_timeout(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    // NaN and infinity parse as f64 but would panic in Duration::from_secs_f64.
    if !value.is_finite() || value <= 0.0 {
        return Err("timeout must be a positive number of seconds".to_string());
    }
    Ok(value)
}
