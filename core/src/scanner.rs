//! The scan orchestrator.
//!
//! Both scan modes follow the same path: the subnet is enumerated, one probe
//! task is spawned per address, and the call returns only after every task
//! has been joined. Tasks share a [`ScanResult`] for the tallies and report
//! their own [`ProbeOutcome`] through an optional callback, so per-host
//! records never go through shared state.
//!
//! At most [`Config::concurrency`] tasks are in flight. A probe that fails is
//! logged and counted; it never aborts its siblings.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sweepr_common::config::Config;
use sweepr_common::network::ports::PortRange;
use sweepr_common::network::subnet::Subnet;
use sweepr_common::{debug, error};
use tokio::task::{JoinError, JoinSet};

use crate::aggregator::ScanResult;
use crate::probe::{ConnectProbe, PingProbe, Probe, ProbeOutcome};

/// Invoked from the probe task once its address has been probed.
pub type OutcomeCallback = Arc<dyn Fn(&ProbeOutcome) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Reachability sweep through the system `ping`.
    Ping,
    /// TCP connect scan of every port in the range.
    Tcp(PortRange),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub subnet: Subnet,
    /// Number of probe tasks dispatched.
    pub probed: usize,
    pub hosts_up: usize,
    /// Probes that could not run. These hosts are neither up nor down.
    pub failures: usize,
    pub elapsed: Duration,
}

/// Parses `target` as CIDR and runs a scan of the requested kind against it.
///
/// An unparseable target fails before any probe is dispatched.
pub async fn perform_scan(
    target: &str,
    mode: ScanMode,
    cfg: &Config,
    on_outcome: Option<OutcomeCallback>,
) -> anyhow::Result<ScanReport> {
    let subnet: Subnet = target.parse()?;

    let report: ScanReport = match mode {
        ScanMode::Ping => {
            let probe = PingProbe::from(cfg);
            sweep(subnet, Arc::new(probe), cfg, on_outcome).await
        }
        ScanMode::Tcp(ports) => {
            let probe = ConnectProbe::new(ports.to_vec(), cfg.connect_timeout);
            sweep(subnet, Arc::new(probe), cfg, on_outcome).await
        }
    };

    Ok(report)
}

/// Probes every address of `subnet` selected by [`Config::range_policy`].
pub async fn sweep<P>(
    subnet: Subnet,
    probe: Arc<P>,
    cfg: &Config,
    on_outcome: Option<OutcomeCallback>,
) -> ScanReport
where
    P: Probe + 'static,
{
    let start_time: Instant = Instant::now();
    let result: Arc<ScanResult> = Arc::new(ScanResult::new());
    let limit: usize = cfg.concurrency.max(1);
    let mut tasks: JoinSet<()> = JoinSet::new();
    let mut probed: usize = 0;

    debug!(
        "Sweeping {} addresses of {subnet}, {limit} in flight at most",
        subnet.host_count(cfg.range_policy)
    );

    for addr in subnet.hosts(cfg.range_policy) {
        while tasks.len() >= limit {
            if let Some(joined) = tasks.join_next().await {
                reap(joined, &result);
            }
        }

        tasks.spawn(probe_address(
            addr,
            Arc::clone(&probe),
            Arc::clone(&result),
            on_outcome.clone(),
        ));
        probed += 1;
    }

    while let Some(joined) = tasks.join_next().await {
        reap(joined, &result);
    }

    ScanReport {
        subnet,
        probed,
        hosts_up: result.total(),
        failures: result.failures(),
        elapsed: start_time.elapsed(),
    }
}

async fn probe_address<P>(
    addr: Ipv4Addr,
    probe: Arc<P>,
    result: Arc<ScanResult>,
    on_outcome: Option<OutcomeCallback>,
) where
    P: Probe + ?Sized,
{
    match probe.probe(addr).await {
        Ok(outcome) => {
            if outcome.is_up() {
                result.record_up();
            }
            if let Some(callback) = &on_outcome {
                callback(&outcome);
            }
        }
        Err(e) => {
            error!("{e}");
            result.record_failure();
        }
    }
}

/// A task that panicked or was cancelled counts as a failed probe.
fn reap(joined: Result<(), JoinError>, result: &ScanResult) {
    if let Err(e) = joined {
        error!("Probe task ended abnormally: {e}");
        result.record_failure();
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
