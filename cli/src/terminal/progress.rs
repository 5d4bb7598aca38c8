use colored::*;
use indicatif::ProgressStyle;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

const TEMPLATE: &str = "{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} {msg}";

/// Style of the bar shown while a sweep runs.
pub fn sweep_style() -> anyhow::Result<ProgressStyle> {
    Ok(ProgressStyle::with_template(TEMPLATE)?
        .tick_strings(TICKS)
        .progress_chars("=> "))
}

pub fn responsive_message(count: usize) -> String {
    format!("{} responded", format!("{count} hosts").green().bold())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
