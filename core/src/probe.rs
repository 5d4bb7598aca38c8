//! Single-host reachability checks.
//!
//! A [`Prober`] is the opaque primitive that actually talks to the network.
//! [`probe_host`] wraps it so that a prober which cannot even be invoked
//! (missing binary, missing permission) yields [`Verdict::Down`] instead of
//! an error: one host must never abort the whole sweep.

use std::fmt;
use std::net::Ipv4Addr;

use async_trait::async_trait;
use pingsweep_common::config::ProbeConfig;
use tracing::debug;

mod ping;
mod tcp;

pub use ping::SystemPing;
pub use tcp::{DEFAULT_TCP_PORT, TcpProber};

/// A reachability check against one address.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Returns `Ok(true)` when at least one of `cfg.count()` attempts, each bounded
    /// by `cfg.timeout()`, got an answer.
    ///
    /// `Err` means the check itself could not run.
    async fn probe(&self, addr: Ipv4Addr, cfg: &ProbeConfig) -> anyhow::Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Up,
    Down,
}

impl Verdict {
    pub fn is_up(self) -> bool {
        self == Verdict::Up
    }
}

impl From<bool> for Verdict {
    fn from(alive: bool) -> Self {
        if alive { Verdict::Up } else { Verdict::Down }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Up => f.write_str("up"),
            Verdict::Down => f.write_str("down"),
        }
    }
}

/// The verdict for one candidate. Produced exactly once per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeResult {
    pub addr: Ipv4Addr,
    pub verdict: Verdict,
}

impl ProbeResult {
    pub fn new(addr: Ipv4Addr, verdict: Verdict) -> Self {
        Self { addr, verdict }
    }

    pub fn is_up(&self) -> bool {
        self.verdict.is_up()
    }
}

/// Probes `addr` once with `prober`, folding invocation failures into [`Verdict::Down`].
pub async fn probe_host<P>(prober: &P, addr: Ipv4Addr, cfg: &ProbeConfig) -> ProbeResult
where
    P: Prober + ?Sized,
{
    let verdict = match prober.probe(addr, cfg).await {
        Ok(alive) => Verdict::from(alive),
        Err(e) => {
            debug!(%addr, "probe could not be invoked: {e:#}");
            Verdict::Down
        }
    };
    ProbeResult::new(addr, verdict)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(anyhow::Result<bool>);

    #[async_trait]
    impl Prober for Fixed {
        async fn probe(&self, _addr: Ipv4Addr, _cfg: &ProbeConfig) -> anyhow::Result<bool> {
            match &self.0 {
                Ok(alive) => Ok(*alive),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    const ADDR: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

    #[tokio::test]
    async fn probe_host_reports_up() {
        let result = probe_host(&Fixed(Ok(true)), ADDR, &ProbeConfig::default()).await;
        assert_eq!(result, ProbeResult::new(ADDR, Verdict::Up));
        assert!(result.is_up());
    }

    #[tokio::test]
    async fn probe_host_reports_down() {
        let result = probe_host(&Fixed(Ok(false)), ADDR, &ProbeConfig::default()).await;
        assert_eq!(result.verdict, Verdict::Down);
    }

    #[tokio::test]
    async fn probe_host_folds_invocation_failure_into_down() {
        let prober = Fixed(Err(anyhow::anyhow!("permission denied")));
        let result = probe_host(&prober, ADDR, &ProbeConfig::default()).await;
        assert_eq!(result, ProbeResult::new(ADDR, Verdict::Down));
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::Up.to_string(), "up");
        assert_eq!(Verdict::from(false).to_string(), "down");
    }
}
