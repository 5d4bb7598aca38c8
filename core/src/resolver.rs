//! Expands an address specification into the candidates of one sweep.

use std::net::Ipv4Addr;

use pingsweep_common::error::SweepError;
use pingsweep_common::network::range::{self, Ipv4Range};
use pingsweep_common::network::spec::AddressSpec;
use pnet::ipnetwork::Ipv4Network;
use tracing::debug;

/// The addresses a sweep will probe, in strictly ascending order.
///
/// The usable hosts of a network clipped to a bound pair are always one
/// contiguous block, so candidates are stored as a range and produced lazily.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    network: Ipv4Network,
    range: Ipv4Range,
}

impl Candidates {
    pub fn network(&self) -> Ipv4Network {
        self.network
    }

    pub fn range(&self) -> Ipv4Range {
        self.range
    }

    pub fn len(&self) -> u64 {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> + Send + use<> {
        self.range.iter()
    }
}

/// Resolves `spec` into its candidates.
///
/// # Errors
///
/// * [`SweepError::InvalidSpec`] when the network text does not parse.
/// * [`SweepError::InvalidBounds`] when a bound does not parse or start > end.
/// * [`SweepError::EmptyRange`] when the bounds hold none of the network's usable hosts.
pub fn resolve(spec: &AddressSpec) -> Result<Candidates, SweepError> {
    let network: Ipv4Network = spec.parse_network()?;
    let hosts: Ipv4Range = range::host_range(&network);

    let range: Ipv4Range = match spec.parse_bounds()? {
        None => hosts,
        Some(bounds) => hosts
            .intersect(&bounds)
            .ok_or_else(|| SweepError::EmptyRange {
                start: bounds.start_addr,
                end: bounds.end_addr,
                network: network.to_string(),
            })?,
    };

    debug!(
        %network,
        first = %range.start_addr,
        last = %range.end_addr,
        count = range.len(),
        "resolved candidates"
    );

    Ok(Candidates { network, range })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
