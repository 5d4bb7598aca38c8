//! Bounded fan-out of probes across a candidate set.
//!
//! The scheduler keeps at most `workers` probes in flight. Whenever one
//! finishes, the next unstarted candidate takes its slot, so a slow host only
//! ever holds one slot. Verdicts are recorded in the order they complete.
//!
//! The collecting loop is the only writer of the [`ScanReport`]; probe tasks
//! hand their verdicts back through the [`JoinSet`].

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;

use pingsweep_common::config::ProbeConfig;
use pingsweep_common::error::SweepError;
use tokio::task::{self, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::probe::{self, ProbeResult, Prober, Verdict};
use crate::report::ScanReport;
use crate::resolver::Candidates;

/// Invoked once per verdict, in arrival order.
pub type ResultCallback = Box<dyn Fn(&ProbeResult) + Send + Sync>;
/// Invoked once with the sealed report.
pub type CompleteCallback = Box<dyn Fn(&ScanReport) + Send + Sync>;

pub struct SweepScanner {
    prober: Arc<dyn Prober>,
    cfg: ProbeConfig,
    workers: usize,
    cancel: CancellationToken,
    on_result: Option<ResultCallback>,
    on_complete: Option<CompleteCallback>,
}

impl SweepScanner {
    /// Creates a scanner that keeps at most `workers` probes in flight.
    pub fn new(
        prober: Arc<dyn Prober>,
        cfg: ProbeConfig,
        workers: usize,
    ) -> Result<Self, SweepError> {
        if workers == 0 {
            return Err(SweepError::InvalidWorkerBudget(workers));
        }

        Ok(Self {
            prober,
            cfg,
            workers,
            cancel: CancellationToken::new(),
            on_result: None,
            on_complete: None,
        })
    }

    /// Shares `cancel` with the caller. Cancelling it stops new probes from being issued.
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn on_result<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProbeResult) + Send + Sync + 'static,
    {
        self.on_result = Some(Box::new(callback));
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ScanReport) + Send + Sync + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Probes every candidate and returns the sealed report.
    ///
    /// A cancelled sweep returns the verdicts recorded so far, with the report
    /// marked incomplete.
    pub async fn scan(&self, candidates: &Candidates) -> ScanReport {
        self.run(candidates.iter(), candidates.len()).await
    }

    /// Same as [`scan`](Self::scan) for an explicit address list.
    pub async fn scan_list(&self, addrs: &[Ipv4Addr]) -> ScanReport {
        self.run(addrs.to_vec().into_iter(), addrs.len() as u64).await
    }

    async fn run<I>(&self, mut queue: I, total: u64) -> ScanReport
    where
        I: Iterator<Item = Ipv4Addr>,
    {
        let started: Instant = Instant::now();
        let mut report: ScanReport = ScanReport::new(total);
        let mut in_flight: JoinSet<ProbeResult> = JoinSet::new();
        let mut pending: HashMap<task::Id, Ipv4Addr> = HashMap::with_capacity(self.workers);

        debug!(total, workers = self.workers, "starting sweep");

        loop {
            while in_flight.len() < self.workers && !self.cancel.is_cancelled() {
                let Some(addr) = queue.next() else {
                    break;
                };
                let prober: Arc<dyn Prober> = Arc::clone(&self.prober);
                let handle = in_flight.spawn(probe_task(prober, addr, self.cfg));
                pending.insert(handle.id(), addr);
            }

            if in_flight.is_empty() {
                break;
            }

            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    debug!(abandoned = in_flight.len(), "sweep cancelled");
                    in_flight.abort_all();
                    break;
                }

                Some(joined) = in_flight.join_next_with_id() => {
                    let result: Option<ProbeResult> = match joined {
                        Ok((id, result)) => {
                            pending.remove(&id);
                            Some(result)
                        }
                        Err(e) => pending.remove(&e.id()).map(|addr| {
                            warn!(%addr, "probe task failed: {e}");
                            ProbeResult::new(addr, Verdict::Down)
                        }),
                    };

                    if let Some(result) = result {
                        self.record(&mut report, result);
                    }
                }
            }
        }

        report.seal(started.elapsed());
        debug!(
            recorded = report.recorded(),
            responsive = report.responsive_count(),
            status = ?report.status(),
            "sweep finished"
        );

        if let Some(callback) = &self.on_complete {
            callback(&report);
        }

        report
    }

    fn record(&self, report: &mut ScanReport, result: ProbeResult) {
        trace!(addr = %result.addr, verdict = %result.verdict, "verdict");
        report.record(result);
        if let Some(callback) = &self.on_result {
            callback(&result);
        }
    }
}

async fn probe_task(prober: Arc<dyn Prober>, addr: Ipv4Addr, cfg: ProbeConfig) -> ProbeResult {
    probe::probe_host(prober.as_ref(), addr, &cfg).await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
