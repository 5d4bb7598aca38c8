use std::net::Ipv4Addr;
use std::time::Duration;

use colored::*;
use pingsweep_common::config::{DEFAULT_COUNT, DEFAULT_TIMEOUT, DEFAULT_WORKERS, ProbeConfig};
use pingsweep_core::probe::{Prober, SystemPing};

use crate::terminal::print;

const KEY_WIDTH: usize = 9;

pub async fn info() -> anyhow::Result<()> {
    print::aligned_line("Version", env!("CARGO_PKG_VERSION"), KEY_WIDTH);
    print::aligned_line(
        "Platform",
        format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        KEY_WIDTH,
    );
    print::aligned_line("Workers", DEFAULT_WORKERS, KEY_WIDTH);
    print::aligned_line(
        "Probe",
        format!("{} x {}ms", DEFAULT_COUNT, DEFAULT_TIMEOUT.as_millis()),
        KEY_WIDTH,
    );
    print::aligned_line("ICMP", icmp_status().await, KEY_WIDTH);
    Ok(())
}

/// Checks whether the system ping binary can reach loopback.
async fn icmp_status() -> ColoredString {
    let cfg = match ProbeConfig::new(1, Duration::from_millis(500)) {
        Ok(cfg) => cfg,
        Err(e) => return e.to_string().red(),
    };

    match SystemPing::new().probe(Ipv4Addr::LOCALHOST, &cfg).await {
        Ok(true) => "available".green(),
        Ok(false) => "ping runs but loopback did not answer".yellow(),
        Err(e) => format!("unavailable ({e}), use --method tcp").red(),
    }
}
