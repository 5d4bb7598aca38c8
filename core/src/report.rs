//! The aggregated outcome of one sweep.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::probe::ProbeResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Every candidate produced a verdict.
    Complete,
    /// The sweep was cancelled before every candidate produced a verdict.
    Incomplete,
}

/// Responsive hosts in the order their verdicts arrived, not in candidate order.
///
/// Down verdicts are only counted. Callers that want every verdict take them
/// from the scanner's result callback, so the report stays proportional to the
/// number of live hosts on very large sweeps.
///
/// Only the scheduler writes to a report. Once handed to the caller it is
/// read-only.
#[derive(Debug, Clone)]
pub struct ScanReport {
    recorded: u64,
    responsive: Vec<Ipv4Addr>,
    total: u64,
    status: ScanStatus,
    elapsed: Duration,
}

impl ScanReport {
    pub(crate) fn new(total: u64) -> Self {
        Self {
            recorded: 0,
            responsive: Vec::new(),
            total,
            status: ScanStatus::Incomplete,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn record(&mut self, result: ProbeResult) {
        if result.is_up() {
            self.responsive.push(result.addr);
        }
        self.recorded += 1;
    }

    pub(crate) fn seal(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        self.status = if self.recorded == self.total {
            ScanStatus::Complete
        } else {
            ScanStatus::Incomplete
        };
    }

    /// Responsive hosts, in arrival order.
    pub fn responsive(&self) -> &[Ipv4Addr] {
        &self.responsive
    }

    /// Number of candidates the sweep was asked to probe.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn responsive_count(&self) -> usize {
        self.responsive.len()
    }

    /// Number of verdicts recorded, up or down.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == ScanStatus::Complete
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Writes the responsive hosts one per line, without a header.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for addr in &self.responsive {
            writeln!(writer, "{addr}")?;
        }
        writer.flush()
    }

    /// Writes the responsive hosts to `path`, replacing any existing file.
    pub fn export(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        self.write_to(BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))
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
