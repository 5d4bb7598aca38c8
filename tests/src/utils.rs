use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pingsweep_common::config::ProbeConfig;
use pingsweep_core::probe::Prober;

/// A prober with a fixed set of live hosts that records how it was driven.
pub struct StubProber {
    alive: HashSet<Ipv4Addr>,
    failing: HashSet<Ipv4Addr>,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    high_water: AtomicUsize,
}

impl StubProber {
    pub fn new(alive: impl IntoIterator<Item = Ipv4Addr>, delay: Duration) -> Self {
        Self {
            alive: alive.into_iter().collect(),
            failing: HashSet::new(),
            delay,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            high_water: AtomicUsize::new(0),
        }
    }

    /// Makes the probe primitive itself error for `addrs`.
    pub fn failing_for(mut self, addrs: impl IntoIterator<Item = Ipv4Addr>) -> Self {
        self.failing = addrs.into_iter().collect();
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn high_water(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for StubProber {
    async fn probe(&self, addr: Ipv4Addr, _cfg: &ProbeConfig) -> anyhow::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&addr) {
            anyhow::bail!("ping: permission denied");
        }
        Ok(self.alive.contains(&addr))
    }
}

pub fn probe_cfg() -> ProbeConfig {
    ProbeConfig::new(1, Duration::from_millis(100)).unwrap()
}
