//! # Pingsweep Common
//!
//! Models shared by the scanner core and its front-ends:
//!
//! * **[`network`]**: address specifications and IPv4 ranges.
//! * **[`config`]**: probe and terminal configuration.
//! * **[`error`]**: the validation error taxonomy surfaced before a sweep starts.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
