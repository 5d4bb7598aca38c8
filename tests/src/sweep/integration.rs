use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pingsweep_common::config::DEFAULT_WORKERS;
use pingsweep_common::error::SweepError;
use pingsweep_common::network::spec::AddressSpec;
use pingsweep_core::report::ScanStatus;
use pingsweep_core::resolver;
use pingsweep_core::scanner::SweepScanner;
use tokio_util::sync::CancellationToken;

use crate::utils::{StubProber, probe_cfg};

/// A /30 has two usable hosts; only the first answers.
#[tokio::test(start_paused = true)]
async fn sweep_slash_30_with_one_live_host() {
    let spec = AddressSpec::new("192.168.1.0/30");
    let candidates = resolver::resolve(&spec).unwrap();

    let live = Ipv4Addr::new(192, 168, 1, 1);
    let prober = StubProber::new([live], Duration::from_millis(5)).into_arc();
    let scanner = SweepScanner::new(prober.clone(), probe_cfg(), DEFAULT_WORKERS).unwrap();

    let report = scanner.scan(&candidates).await;

    assert_eq!(report.responsive(), &[live]);
    assert_eq!(report.total(), 2);
    assert_eq!(report.responsive_count(), 1);
    assert_eq!(report.status(), ScanStatus::Complete);
    assert_eq!(prober.calls(), 2);
}

#[test]
fn reversed_bounds_fail_before_scanning() {
    let spec = AddressSpec::new("10.0.0.0/24").with_bounds("10.0.0.250", "10.0.0.5");
    assert!(matches!(
        resolver::resolve(&spec),
        Err(SweepError::InvalidBounds(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn in_flight_probes_never_exceed_budget() {
    let candidates = resolver::resolve(&AddressSpec::new("10.20.0.0/23")).unwrap();

    for budget in [1, 3, 16, 50] {
        let prober = StubProber::new([], Duration::from_millis(20)).into_arc();
        let scanner = SweepScanner::new(prober.clone(), probe_cfg(), budget).unwrap();

        let report = scanner.scan(&candidates).await;

        assert_eq!(report.recorded(), candidates.len());
        assert_eq!(prober.calls() as u64, candidates.len());
        assert!(
            prober.high_water() <= budget,
            "budget {budget} exceeded: {}",
            prober.high_water()
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn budget_holds_on_multi_thread_runtime() {
    let candidates = resolver::resolve(&AddressSpec::new("10.30.0.0/25")).unwrap();
    let prober = StubProber::new([], Duration::from_millis(2)).into_arc();
    let scanner = SweepScanner::new(prober.clone(), probe_cfg(), 7).unwrap();

    let report = scanner.scan(&candidates).await;

    assert!(report.is_complete());
    assert!(prober.high_water() <= 7);
}

#[tokio::test(start_paused = true)]
async fn probe_invocation_failures_are_down_not_errors() {
    let addrs: Vec<Ipv4Addr> = (1..=6).map(|i| Ipv4Addr::new(172, 16, 0, i)).collect();
    let prober = StubProber::new(addrs.clone(), Duration::from_millis(1))
        .failing_for([Ipv4Addr::new(172, 16, 0, 2), Ipv4Addr::new(172, 16, 0, 5)])
        .into_arc();
    let scanner = SweepScanner::new(prober, probe_cfg(), 3).unwrap();

    let report = scanner.scan_list(&addrs).await;

    assert!(report.is_complete());
    assert_eq!(report.recorded(), 6);
    assert_eq!(report.responsive_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn cancelling_after_three_of_ten() {
    let candidates = resolver::resolve(
        &AddressSpec::new("10.0.0.0/24").with_bounds("10.0.0.1", "10.0.0.10"),
    )
    .unwrap();
    assert_eq!(candidates.len(), 10);

    let prober = StubProber::new([], Duration::from_millis(10)).into_arc();
    let cancel = CancellationToken::new();
    let reported = Arc::new(AtomicUsize::new(0));

    let scanner = SweepScanner::new(prober.clone(), probe_cfg(), 1)
        .unwrap()
        .with_cancel_token(cancel.clone())
        .on_result({
            let reported = Arc::clone(&reported);
            move |_| {
                if reported.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                    cancel.cancel();
                }
            }
        });

    let report = scanner.scan(&candidates).await;

    assert!(!report.is_complete());
    assert_eq!(report.recorded(), 3);
    assert_eq!(prober.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn export_matches_arrival_order() {
    let alive = [Ipv4Addr::new(10, 1, 1, 9), Ipv4Addr::new(10, 1, 1, 3)];
    let prober = StubProber::new(alive, Duration::from_millis(1)).into_arc();
    let scanner = SweepScanner::new(prober, probe_cfg(), 1).unwrap();

    let candidates = resolver::resolve(&AddressSpec::new("10.1.1.0/28")).unwrap();
    let report = scanner.scan(&candidates).await;

    let mut out: Vec<u8> = Vec::new();
    report.write_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // budget 1 makes arrival order equal to candidate order
    assert_eq!(text, "10.1.1.3\n10.1.1.9\n");
}
