use std::fmt::{self, Write as _};

use colored::*;
use crossterm::terminal::is_raw_mode_enabled;
use pingsweep_common::log::SUCCESS_TARGET;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Events under this target are written verbatim, without a status symbol.
pub const PRINT_TARGET: &str = "pingsweep::print";

/// Installs the global subscriber. Log lines are routed through the progress
/// bar so they never tear it.
pub fn init(verbose: bool) {
    let default_level: &str = if verbose { "debug" } else { "info" };
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let indicatif_layer = IndicatifLayer::new();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(SweepFormatter)
        .with_writer(indicatif_layer.get_stderr_writer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer)
        .init();
}

pub struct SweepFormatter;

impl<S, N> FormatEvent<S, N> for SweepFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            write!(writer, "{}", raw.0)?;
            return end_line(&mut writer);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            match *meta.level() {
                _ if meta.target() == SUCCESS_TARGET => ("[+]", |s| s.green().bold()),
                Level::TRACE => ("[ ]", |s| s.dimmed()),
                Level::DEBUG => ("[?]", |s| s.blue()),
                Level::INFO => ("[*]", |s| s.cyan().bold()),
                Level::WARN => ("[!]", |s| s.yellow().bold()),
                Level::ERROR => ("[-]", |s| s.red().bold()),
            };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        end_line(&mut writer)
    }
}

// Raw mode (the 'q' listener) disables the terminal's newline translation.
fn end_line(writer: &mut Writer<'_>) -> fmt::Result {
    if is_raw_mode_enabled().unwrap_or(false) {
        writer.write_str("\r\n")
    } else {
        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "raw_msg" {
            let _ = write!(self.0, "{value:?}");
        }
    }
}
