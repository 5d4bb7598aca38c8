pub mod info;
pub mod sweep;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use pingsweep_common::config::{DEFAULT_COUNT, DEFAULT_TIMEOUT_MS, DEFAULT_WORKERS};
use pingsweep_core::probe::DEFAULT_TCP_PORT;

#[derive(Parser)]
#[command(name = "pingsweep")]
#[command(version, about = "A concurrent ping sweep for IPv4 networks.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Less output. Repeat (-qq) to print only responsive addresses
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not listen for 'q' to finish early
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Also log unresponsive hosts and internal diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show information about the tool and its probing backends
    #[command(alias = "i")]
    Info,
    /// Find responsive hosts in a network
    #[command(alias = "s")]
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Network in CIDR notation (e.g. 192.168.1.0/24) or a single address
    pub network: String,

    /// First address of the sweep, inclusive
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Last address of the sweep, inclusive
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Attempts per host
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    pub count: u32,

    /// Timeout per attempt, in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Maximum number of probes in flight
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// How hosts are probed
    #[arg(short, long, value_enum, default_value_t = Method::Icmp)]
    pub method: Method,

    /// Port used by the tcp method
    #[arg(short, long, default_value_t = DEFAULT_TCP_PORT)]
    pub port: u16,

    /// Write responsive hosts to FILE, one per line
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// ICMP echo through the system ping binary
    Icmp,
    /// TCP handshake, works without privileges
    Tcp,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<CommandLine, clap::Error> {
        CommandLine::try_parse_from(std::iter::once("pingsweep").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_valid() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn sweep_defaults() {
        let cli = parse(&["sweep", "192.168.1.0/24"]).unwrap();
        let Commands::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.network, "192.168.1.0/24");
        assert_eq!(args.count, DEFAULT_COUNT);
        assert_eq!(args.timeout, DEFAULT_TIMEOUT_MS);
        assert_eq!(args.workers, DEFAULT_WORKERS);
        assert_eq!(args.method, Method::Icmp);
        assert!(args.start.is_none() && args.output.is_none());
    }

    #[test]
    fn sweep_with_bounds_and_options() {
        let cli = parse(&[
            "-qq", "s", "10.0.0.0/24", "--start", "10.0.0.5", "--end", "10.0.0.9", "-c", "3",
            "-t", "250", "-w", "8", "-m", "tcp", "-p", "22", "-o", "hosts.txt",
        ])
        .unwrap();
        assert_eq!(cli.quiet, 2);
        let Commands::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.start.as_deref(), Some("10.0.0.5"));
        assert_eq!(args.end.as_deref(), Some("10.0.0.9"));
        assert_eq!((args.count, args.timeout, args.workers), (3, 250, 8));
        assert_eq!(args.method, Method::Tcp);
        assert_eq!(args.port, 22);
        assert_eq!(args.output, Some(PathBuf::from("hosts.txt")));
    }

    #[test]
    fn start_without_end_is_rejected() {
        assert!(parse(&["sweep", "10.0.0.0/24", "--start", "10.0.0.5"]).is_err());
        assert!(parse(&["sweep", "10.0.0.0/24", "--end", "10.0.0.5"]).is_err());
    }
}
