use std::net::Ipv4Addr;

use thiserror::Error;

/// Input validation failures. All of them are raised before the first probe is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    /// The network text is not an IPv4 address or CIDR block.
    #[error("invalid network '{input}': {reason}")]
    InvalidSpec { input: String, reason: String },

    /// A bound failed to parse, or start is greater than end.
    #[error("invalid range bounds: {0}")]
    InvalidBounds(String),

    /// The bounds are well-formed but no usable host of the network lies between them.
    #[error("range {start} - {end} contains no usable host of {network}")]
    EmptyRange {
        start: Ipv4Addr,
        end: Ipv4Addr,
        network: String,
    },

    #[error("invalid probe configuration: {0}")]
    InvalidProbeConfig(String),

    #[error("worker budget must be at least 1, got {0}")]
    InvalidWorkerBudget(usize),
}
