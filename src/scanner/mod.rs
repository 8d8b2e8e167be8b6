//! Scan orchestration — the concurrent probing engine.
//!
//! Drives two strictly sequential phases over a bounded worker pool:
//! a liveness phase probing every enumerated target, then a port phase
//! probing every (alive host, requested port) pair. The pool cap is
//! shared globally across all in-flight probes of a phase so multi-host
//! scans cannot exhaust local descriptors or flood the target network.
//!
//! Results funnel through an mpsc channel into a single aggregating
//! owner, which makes the "every dispatched task is accounted for"
//! invariant a matter of counting completions against dispatches.

use crate::error::ScanResult;
use crate::probe::{LivenessProbe, PortProber, SystemPing};
use crate::resolve;
use crate::services;
use crate::types::{target, AliveHost, HostReport, OpenPort, Port, PortSpec, ScanReport};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

/// Default cap on concurrent in-flight probes.
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Cooperative cancellation flag shared between the engine and its caller.
///
/// Once raised, no new probe tasks are dispatched; in-flight probes
/// complete or time out naturally so no sockets are abandoned.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Everything the engine needs to run one scan.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Network to scan, in CIDR notation.
    pub cidr: String,
    /// Ports to probe on each alive host; the well-known set when `None`.
    pub ports: Option<PortSpec>,
    /// Per-probe timeout.
    pub timeout: Duration,
    /// Cap on concurrent in-flight probes per phase.
    pub concurrency: usize,
    /// Skip the port phase, reporting only the alive set.
    pub hosts_only: bool,
    /// Annotate alive hosts with best-effort reverse DNS names.
    pub resolve_hostnames: bool,
    /// Render a progress bar while scanning.
    pub progress: bool,
}

impl ScanRequest {
    /// Create a request with default settings for the given network.
    pub fn new(cidr: impl Into<String>) -> Self {
        Self {
            cidr: cidr.into(),
            ports: None,
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            hosts_only: false,
            resolve_hostnames: true,
            progress: false,
        }
    }

    /// Set the ports to probe.
    pub fn with_ports(mut self, ports: PortSpec) -> Self {
        self.ports = Some(ports);
        self
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the concurrency cap.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Only discover hosts; skip port scanning.
    pub fn hosts_only(mut self) -> Self {
        self.hosts_only = true;
        self
    }

    /// Skip reverse DNS annotation.
    pub fn without_dns(mut self) -> Self {
        self.resolve_hostnames = false;
        self
    }

    /// Show a progress bar.
    pub fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }
}

/// The concurrent probing engine.
pub struct NetworkScanner {
    liveness: Arc<dyn LivenessProbe>,
    cancel: CancelToken,
}

impl Default for NetworkScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkScanner {
    /// Create a scanner using the system ping command for liveness.
    pub fn new() -> Self {
        Self::with_liveness(Arc::new(SystemPing::new()))
    }

    /// Create a scanner with a custom liveness mechanism.
    pub fn with_liveness(liveness: Arc<dyn LivenessProbe>) -> Self {
        Self {
            liveness,
            cancel: CancelToken::new(),
        }
    }

    /// Get a handle that can cancel this scanner's in-progress scan.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run a complete scan.
    ///
    /// A malformed CIDR is the only unrecoverable failure; individual
    /// probe failures are absorbed as negative findings. Zero alive
    /// hosts is a normal outcome yielding an empty report.
    pub async fn scan(&self, request: &ScanRequest) -> ScanResult<ScanReport> {
        let started_at = Local::now();
        let started = Instant::now();

        let network = target::parse_network(&request.cidr)?;
        let targets: Vec<Ipv4Addr> = target::usable_hosts(network).collect();
        info!(network = %network, targets = targets.len(), "enumerated scan targets");

        let ports = match &request.ports {
            Some(spec) => spec.to_ports(),
            None => services::default_ports(),
        };

        let alive = self.discover_hosts(&targets, request).await;
        info!(alive = alive.len(), "liveness phase complete");

        let hostnames = if request.resolve_hostnames && !alive.is_empty() {
            resolve::reverse_lookup_all(&alive).await
        } else {
            vec![None; alive.len()]
        };

        let hosts: Vec<AliveHost> = alive
            .iter()
            .zip(hostnames)
            .map(|(&addr, hostname)| AliveHost::new(addr).with_hostname(hostname))
            .collect();

        let hosts: Vec<HostReport> = if request.hosts_only || hosts.is_empty() {
            hosts
                .into_iter()
                .map(|host| HostReport {
                    host,
                    open_ports: Vec::new(),
                })
                .collect()
        } else {
            let mut open = self.scan_ports(&alive, &ports, request).await;
            info!(open_ports = open.values().map(Vec::len).sum::<usize>(), "port phase complete");
            hosts
                .into_iter()
                .map(|host| {
                    let open_ports = open.remove(&host.addr).unwrap_or_default();
                    HostReport { host, open_ports }
                })
                .collect()
        };

        Ok(ScanReport {
            network: network.to_string(),
            started_at,
            duration_ms: started.elapsed().as_millis() as u64,
            targets_probed: targets.len(),
            hosts_only: request.hosts_only,
            hosts,
        })
    }

    /// Liveness phase: probe every target, return the sorted alive set.
    async fn discover_hosts(
        &self,
        targets: &[Ipv4Addr],
        request: &ScanRequest,
    ) -> Vec<Ipv4Addr> {
        let semaphore = Arc::new(Semaphore::new(request.concurrency.max(1)));
        let (tx, mut rx) = mpsc::channel(request.concurrency.max(1));
        let progress = phase_progress(request.progress, targets.len() as u64, "discovering hosts");

        let mut dispatched = 0usize;
        for &addr in targets {
            if self.cancel.is_cancelled() {
                warn!("cancellation requested; not dispatching further liveness probes");
                break;
            }

            let semaphore = Arc::clone(&semaphore);
            let probe = Arc::clone(&self.liveness);
            let tx = tx.clone();
            let timeout = request.timeout;
            dispatched += 1;

            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let alive = match probe.probe(addr, timeout).await {
                    Ok(alive) => alive,
                    Err(e) => {
                        warn!(%addr, error = %e, "liveness probe unavailable; assuming unreachable");
                        false
                    }
                };
                // A send error means the aggregator is gone; nothing to do.
                let _ = tx.send((addr, alive)).await;
            });
        }
        drop(tx);

        let mut alive_hosts = Vec::new();
        let mut completed = 0usize;
        while let Some((addr, alive)) = rx.recv().await {
            completed += 1;
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            if alive {
                debug!(%addr, "host is up");
                alive_hosts.push(addr);
            }
        }
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        // The channel closes only once every dispatched task has reported.
        debug_assert_eq!(dispatched, completed);

        alive_hosts.sort_unstable();
        alive_hosts
    }

    /// Port phase: probe every (alive host, port) pair under one global
    /// concurrency cap, returning each host's sorted open ports.
    async fn scan_ports(
        &self,
        hosts: &[Ipv4Addr],
        ports: &[Port],
        request: &ScanRequest,
    ) -> HashMap<Ipv4Addr, Vec<OpenPort>> {
        let prober = PortProber::new(request.timeout);
        let semaphore = Arc::new(Semaphore::new(request.concurrency.max(1)));
        let (tx, mut rx) = mpsc::channel(request.concurrency.max(1));
        let total = (hosts.len() * ports.len()) as u64;
        let progress = phase_progress(request.progress, total, "probing ports");

        let mut dispatched = 0usize;
        'dispatch: for &addr in hosts {
            for &port in ports {
                if self.cancel.is_cancelled() {
                    warn!("cancellation requested; not dispatching further port probes");
                    break 'dispatch;
                }

                let semaphore = Arc::clone(&semaphore);
                let tx = tx.clone();
                dispatched += 1;

                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                    let status = prober.probe(addr, port).await;
                    let _ = tx.send((addr, port, status)).await;
                });
            }
        }
        drop(tx);

        let mut open: HashMap<Ipv4Addr, Vec<OpenPort>> =
            hosts.iter().map(|&addr| (addr, Vec::new())).collect();
        let mut completed = 0usize;
        while let Some((addr, port, status)) = rx.recv().await {
            completed += 1;
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            if status.is_open() {
                let service = services::service_label(port.as_u16());
                debug!(%addr, %port, service, "open port");
                if let Some(entry) = open.get_mut(&addr) {
                    entry.push(OpenPort::new(port, service));
                }
            }
        }
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        debug_assert_eq!(dispatched, completed);

        for entry in open.values_mut() {
            entry.sort_by_key(|p| p.port);
        }
        open
    }
}

fn phase_progress(enabled: bool, total: u64, msg: &'static str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("static progress template")
            .progress_chars("=>-"),
    );
    pb.set_message(msg);
    Some(pb)
}
