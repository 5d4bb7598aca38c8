//! # IPv4 Range Model
//!
//! Continuous, inclusive ranges of IPv4 addresses. Candidate sets are always
//! contiguous, so a sweep over a `/8` never has to hold sixteen million
//! addresses in memory.

use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

/// Represents a continuous range of IPv4 addresses, inclusive.
///
/// A range whose start is greater than its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Addresses in ascending numeric order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + Send + use<> {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> u64 {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        if start > end {
            0
        } else {
            u64::from(end - start) + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The addresses present in both ranges, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Ipv4Range) -> Option<Ipv4Range> {
        let start = self.start_addr.max(other.start_addr);
        let end = self.end_addr.min(other.end_addr);
        (start <= end).then(|| Ipv4Range::new(start, end))
    }
}

/// The usable hosts of `network`.
///
/// Network and broadcast addresses are dropped when the block holds more than
/// two addresses. `/31` and `/32` blocks keep every address.
pub fn host_range(network: &Ipv4Network) -> Ipv4Range {
    let first: u32 = u32::from(network.network());
    let last: u32 = u32::from(network.broadcast());

    if network.prefix() >= 31 {
        return Ipv4Range::new(Ipv4Addr::from(first), Ipv4Addr::from(last));
    }

    Ipv4Range::new(Ipv4Addr::from(first + 1), Ipv4Addr::from(last - 1))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
