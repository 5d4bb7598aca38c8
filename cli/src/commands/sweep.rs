use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug, info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::commands::{Method, SweepArgs};
use crate::terminal::{colors, input::InputHandle, print, progress};
use pingsweep_common::{config::Config, config::ProbeConfig, network::spec::AddressSpec, success};
use pingsweep_core::probe::{ProbeResult, Prober, SystemPing, TcpProber};
use pingsweep_core::report::ScanReport;
use pingsweep_core::resolver::{self, Candidates};
use pingsweep_core::scanner::SweepScanner;

const KEY_WIDTH: usize = 8;

pub async fn sweep(args: SweepArgs, cfg: &Config) -> anyhow::Result<()> {
    let spec: AddressSpec = address_spec(&args);
    let candidates: Candidates = resolver::resolve(&spec)?;
    let probe_cfg: ProbeConfig = ProbeConfig::new(args.count, Duration::from_millis(args.timeout))?;

    let span = info_span!("sweep", indicatif.pb_show = true);
    span.pb_set_style(&progress::sweep_style()?);
    span.pb_set_length(candidates.len());

    let cancel = CancellationToken::new();
    let scanner = SweepScanner::new(prober_for(&args), probe_cfg, args.workers)?
        .with_cancel_token(cancel.clone())
        .on_result(result_reporter(span.clone(), cfg.quiet));

    sweep_starts(&args, &candidates, &probe_cfg, cfg);

    watch_ctrl_c(cancel.clone());
    let input: Option<InputHandle> = if cfg.disable_input {
        None
    } else {
        InputHandle::start(cancel.clone())
    };

    let report: ScanReport = scanner.scan(&candidates).instrument(span.clone()).await;
    // releases the Ctrl-C watcher
    cancel.cancel();

    drop(input);
    drop(scanner);
    drop(span);

    sweep_ends(&report, cfg);

    if let Some(path) = &args.output {
        export(&report, path)?;
    }

    Ok(())
}

fn address_spec(args: &SweepArgs) -> AddressSpec {
    let spec = AddressSpec::new(args.network.as_str());
    match (&args.start, &args.end) {
        (Some(start), Some(end)) => spec.with_bounds(start.as_str(), end.as_str()),
        _ => spec,
    }
}

fn prober_for(args: &SweepArgs) -> Arc<dyn Prober> {
    match args.method {
        Method::Icmp => Arc::new(SystemPing::new()),
        Method::Tcp => Arc::new(TcpProber::new(args.port)),
    }
}

fn result_reporter(span: Span, quiet: u8) -> impl Fn(&ProbeResult) + Send + Sync + 'static {
    let responsive = std::sync::atomic::AtomicUsize::new(0);

    move |result: &ProbeResult| {
        span.pb_inc(1);

        if !result.is_up() {
            debug!("No Response: {}", result.addr);
            return;
        }

        let count = responsive.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
        span.pb_set_message(&progress::responsive_message(count));

        match quiet {
            2 => print::print(&result.addr.to_string()),
            _ => success!("Host Up: {}", result.addr.to_string().color(colors::IPV4_ADDR)),
        }
    }
}

fn watch_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if res.is_ok() {
                    cancel.cancel();
                }
            }
            _ = cancel.cancelled() => {}
        }
    });
}

fn sweep_starts(args: &SweepArgs, candidates: &Candidates, probe_cfg: &ProbeConfig, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let range: String = match (&args.start, &args.end) {
        (Some(_), Some(_)) => format!(
            "{} - {}",
            candidates.range().start_addr,
            candidates.range().end_addr
        ),
        _ => "full subnet".to_string(),
    };

    print::aligned_line("Network", candidates.network(), KEY_WIDTH);
    print::aligned_line("Range", range, KEY_WIDTH);
    print::aligned_line("Hosts", candidates.len(), KEY_WIDTH);
    print::aligned_line(
        "Probe",
        format!(
            "{} x {}ms ({:?})",
            probe_cfg.count(),
            probe_cfg.timeout().as_millis(),
            args.method
        ),
        KEY_WIDTH,
    );
    print::aligned_line("Workers", args.workers, KEY_WIDTH);
    print::header("starting sweep", cfg.quiet);
}

fn sweep_ends(report: &ScanReport, cfg: &Config) {
    if !report.is_complete() {
        warn!(
            "Sweep cancelled after {} of {} hosts",
            report.recorded(),
            report.total()
        );
    }

    if cfg.quiet > 1 {
        return;
    }

    if report.responsive().is_empty() && cfg.quiet == 0 {
        print::header("zero hosts responded", cfg.quiet);
        print::no_results();
    }

    let active_hosts: ColoredString = format!("{} host(s)", report.responsive_count())
        .bold()
        .green();
    let total_time: ColoredString = format!("{:.2}s", report.elapsed().as_secs_f64())
        .bold()
        .yellow();
    let output: String = format!("Sweep complete: {active_hosts} responded in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => success!("{}", output),
    }
}

fn export(report: &ScanReport, path: &Path) -> anyhow::Result<()> {
    if report.responsive().is_empty() {
        warn!("No results to export");
        return Ok(());
    }

    report.export(path)?;
    success!("Results saved to {}", path.display());
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
