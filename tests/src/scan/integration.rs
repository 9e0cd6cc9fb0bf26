use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sweepr_common::config::Config;
use sweepr_common::error::TargetError;
use sweepr_common::network::host::Host;
use sweepr_common::network::ports::PortRange;
use sweepr_common::network::subnet::RangePolicy;
use sweepr_core::probe::ProbeOutcome;
use sweepr_core::scanner::{self, OutcomeCallback, ScanMode, ScanReport};
use tokio::net::TcpListener;

fn quick_config() -> Config {
    Config {
        no_banner: true,
        quiet: 2,
        connect_timeout: Duration::from_millis(500),
        ..Config::default()
    }
}

fn collector() -> (OutcomeCallback, Arc<Mutex<Vec<ProbeOutcome>>>) {
    let outcomes: Arc<Mutex<Vec<ProbeOutcome>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&outcomes);
    let callback: OutcomeCallback = Arc::new(move |outcome: &ProbeOutcome| {
        sink.lock().unwrap().push(outcome.clone());
    });
    (callback, outcomes)
}

/// Scans 127.0.0.0/30 for a port only 127.0.0.1 listens on.
#[tokio::test]
async fn connect_scan_finds_loopback_listener() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port: u16 = listener.local_addr().unwrap().port();
    let (callback, outcomes) = collector();

    let report: ScanReport = scanner::perform_scan(
        "127.0.0.0/30",
        ScanMode::Tcp(PortRange::single(port)),
        &quick_config(),
        Some(callback),
    )
    .await
    .expect("scan should run");

    assert_eq!(report.probed, 2);
    assert_eq!(report.hosts_up, 1);
    assert_eq!(report.failures, 0);

    let outcomes = outcomes.lock().unwrap();
    assert_eq!(outcomes.len(), 2, "one record per probed host");

    let up: Vec<&Host> = outcomes
        .iter()
        .filter(|outcome| outcome.is_up())
        .map(ProbeOutcome::host)
        .collect();
    assert_eq!(up.len(), 1);
    assert_eq!(up[0].addr, Ipv4Addr::LOCALHOST);
    assert_eq!(up[0].active_ports, vec![port]);
}

#[tokio::test]
async fn connect_scan_through_broadcast_on_slash_31() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port: u16 = listener.local_addr().unwrap().port();
    let cfg = Config {
        range_policy: RangePolicy::ThroughBroadcast,
        ..quick_config()
    };

    let report = scanner::perform_scan("127.0.0.0/31", ScanMode::Tcp(PortRange::single(port)), &cfg, None)
        .await
        .unwrap();

    assert_eq!(report.probed, 1);
    assert_eq!(report.hosts_up, 1);
}

#[tokio::test]
async fn slash_32_probes_nothing() -> anyhow::Result<()> {
    let (callback, outcomes) = collector();

    let report = scanner::perform_scan(
        "127.0.0.1/32",
        ScanMode::Tcp(PortRange::single(1)),
        &quick_config(),
        Some(callback),
    )
    .await?;

    assert_eq!(report.probed, 0);
    assert_eq!(report.hosts_up, 0);
    assert!(outcomes.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_target_aborts_before_probing() {
    let (callback, outcomes) = collector();

    let result = scanner::perform_scan("127.0.0.1", ScanMode::Ping, &quick_config(), Some(callback)).await;

    let err = result.expect_err("a target without prefix is not CIDR");
    assert!(matches!(
        err.downcast_ref::<TargetError>(),
        Some(TargetError::InvalidCidr { .. })
    ));
    assert!(outcomes.lock().unwrap().is_empty());
}

/// Needs a `ping` binary and permission to send echo requests.
#[tokio::test]
#[ignore]
async fn ping_sweep_finds_loopback() {
    let (callback, outcomes) = collector();

    let report = scanner::perform_scan("127.0.0.0/30", ScanMode::Ping, &quick_config(), Some(callback))
        .await
        .unwrap();

    assert_eq!(report.failures, 0);
    assert!(report.hosts_up >= 1);
    assert!(
        outcomes
            .lock()
            .unwrap()
            .iter()
            .any(|outcome| outcome.is_up() && outcome.host().addr == Ipv4Addr::LOCALHOST)
    );
}
