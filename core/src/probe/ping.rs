//! ICMP echo through the operating system's `ping` binary.
//!
//! Raw ICMP sockets need elevated privileges on most systems, while the
//! `ping` binary is installed with the capabilities it needs. The exit status
//! is the verdict: `0` when at least one echo reply arrived.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use pingsweep_common::config::ProbeConfig;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::trace;

use super::Prober;

/// Extra time granted to the child process on top of its own worst case.
const INVOCATION_SLACK: Duration = Duration::from_millis(1_000);

/// Gap `ping` leaves between consecutive echo requests.
const ECHO_INTERVAL: Duration = Duration::from_secs(1);

/// Flag dialect of the local `ping` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    /// `-n <count> -w <ms>`
    Windows,
    /// `-c <count> -W <seconds>`
    Linux,
    /// `-c <count> -W <ms>` (macOS and the BSDs)
    Bsd,
}

impl Flavor {
    fn current() -> Self {
        if cfg!(windows) {
            Flavor::Windows
        } else if cfg!(any(target_os = "linux", target_os = "android")) {
            Flavor::Linux
        } else {
            Flavor::Bsd
        }
    }
}

pub struct SystemPing {
    binary: String,
    flavor: Flavor,
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemPing {
    pub fn new() -> Self {
        Self::with_binary("ping")
    }

    /// Uses `binary` instead of the `ping` found on `PATH`.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            flavor: Flavor::current(),
        }
    }
}

#[async_trait]
impl Prober for SystemPing {
    async fn probe(&self, addr: Ipv4Addr, cfg: &ProbeConfig) -> anyhow::Result<bool> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(build_args(self.flavor, addr, cfg))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let deadline: Duration = invocation_deadline(self.flavor, cfg);

        match timeout(deadline, cmd.status()).await {
            Ok(status) => {
                let status = status.with_context(|| format!("failed to run '{}'", self.binary))?;
                Ok(status.success())
            }
            Err(_elapsed) => {
                trace!(%addr, "ping did not exit within {deadline:?}");
                Ok(false)
            }
        }
    }
}

/// Upper bound on how long `ping` runs for `cfg`. Each attempt occupies at
/// least one echo interval, and on Linux the reply wait is whole seconds.
pub(crate) fn invocation_deadline(flavor: Flavor, cfg: &ProbeConfig) -> Duration {
    let reply_wait: Duration = match flavor {
        Flavor::Linux => Duration::from_secs(linux_wait_secs(cfg)),
        Flavor::Windows | Flavor::Bsd => cfg.timeout(),
    };

    reply_wait
        .max(ECHO_INTERVAL)
        .saturating_mul(cfg.count())
        .saturating_add(INVOCATION_SLACK)
}

fn linux_wait_secs(cfg: &ProbeConfig) -> u64 {
    let timeout: Duration = cfg.timeout();
    let secs: u64 = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    secs.max(1)
}

pub(crate) fn build_args(flavor: Flavor, addr: Ipv4Addr, cfg: &ProbeConfig) -> Vec<String> {
    let count: String = cfg.count().to_string();
    let timeout_ms: u128 = cfg.timeout().as_millis();

    match flavor {
        Flavor::Windows => vec![
            "-n".into(),
            count,
            "-w".into(),
            timeout_ms.to_string(),
            addr.to_string(),
        ],
        // iputils only takes whole seconds here
        Flavor::Linux => vec![
            "-c".into(),
            count,
            "-W".into(),
            linux_wait_secs(cfg).to_string(),
            addr.to_string(),
        ],
        Flavor::Bsd => vec![
            "-c".into(),
            count,
            "-W".into(),
            timeout_ms.to_string(),
            addr.to_string(),
        ],
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
