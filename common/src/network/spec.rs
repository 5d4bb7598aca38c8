//! # Address Specification
//!
//! The caller's description of what to sweep: a network in CIDR notation
//! (or a bare address, meaning `/32`) and an optional inclusive start/end pair.
//!
//! The text is kept as given and only parsed on demand, so the error returned
//! names the field that failed.

use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::SweepError;
use crate::network::range::Ipv4Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpec {
    network: String,
    bounds: Option<(String, String)>,
}

impl AddressSpec {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            bounds: None,
        }
    }

    /// Restricts the sweep to hosts between `start` and `end`, inclusive.
    pub fn with_bounds(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.bounds = Some((start.into(), end.into()));
        self
    }

    pub fn network_text(&self) -> &str {
        &self.network
    }

    pub fn bounds_text(&self) -> Option<(&str, &str)> {
        self.bounds
            .as_ref()
            .map(|(start, end)| (start.as_str(), end.as_str()))
    }

    /// Parses the network text.
    ///
    /// Host bits are allowed and masked away, so `192.168.1.77/24` is
    /// `192.168.1.0/24`.
    pub fn parse_network(&self) -> Result<Ipv4Network, SweepError> {
        let input = self.network.trim();
        let invalid = |reason: String| SweepError::InvalidSpec {
            input: self.network.clone(),
            reason,
        };

        if input.is_empty() {
            return Err(invalid("network cannot be empty".to_string()));
        }
        if input.contains(':') {
            return Err(invalid("only IPv4 networks can be swept".to_string()));
        }

        let (addr_str, prefix_str) = input.split_once('/').unwrap_or((input, "32"));

        let addr = addr_str
            .parse::<Ipv4Addr>()
            .map_err(|e| invalid(format!("address '{addr_str}': {e}")))?;
        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|e| invalid(format!("prefix '{prefix_str}': {e}")))?;

        let network = Ipv4Network::new(addr, prefix).map_err(|e| invalid(e.to_string()))?;
        Ipv4Network::new(network.network(), prefix).map_err(|e| invalid(e.to_string()))
    }

    /// Parses the start/end pair, if one was given.
    pub fn parse_bounds(&self) -> Result<Option<Ipv4Range>, SweepError> {
        let Some((start_str, end_str)) = self.bounds_text() else {
            return Ok(None);
        };

        let start = parse_bound("start", start_str)?;
        let end = parse_bound("end", end_str)?;

        if start > end {
            return Err(SweepError::InvalidBounds(format!(
                "start address {start} is greater than end address {end}"
            )));
        }

        Ok(Some(Ipv4Range::new(start, end)))
    }
}

fn parse_bound(field: &str, s: &str) -> Result<Ipv4Addr, SweepError> {
    s.trim()
        .parse::<Ipv4Addr>()
        .map_err(|e| SweepError::InvalidBounds(format!("{field} address '{s}': {e}")))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
