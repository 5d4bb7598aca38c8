//! # Pingsweep Core
//!
//! The concurrent host-liveness sweep. A sweep runs in three steps:
//!
//! 1. **[`resolver`]**: expands an [`AddressSpec`](pingsweep_common::network::spec::AddressSpec)
//!    into an ordered set of [`Candidates`](resolver::Candidates).
//! 2. **[`scanner`]**: fans candidates out to a [`Prober`](probe::Prober) under a fixed worker budget.
//! 3. **[`report`]**: collects verdicts in arrival order into a [`ScanReport`](report::ScanReport).

pub mod probe;
pub mod report;
pub mod resolver;
pub mod scanner;
