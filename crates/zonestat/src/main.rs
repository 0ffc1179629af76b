//! zonestat - Linux memory-zone statistics snapshot tool.
//!
//! Reads `/proc/zoneinfo` once and prints the parsed node and zone records.

use std::io::Write;

use clap::{Parser, ValueEnum};
use tracing::{Level, debug, error};
use tracing_subscriber::EnvFilter;

use zonestat_core::collector::{DEFAULT_PROC_PATH, RealFs, ZoneinfoCollector};
use zonestat_core::models::Zoneinfo;

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Compact JSON, one document.
    Json,
    /// Indented JSON.
    Pretty,
    /// One line per zone with watermarks.
    Summary,
}

/// Linux memory-zone statistics snapshot tool.
#[derive(Parser)]
#[command(name = "zonestat", about = "Print /proc/zoneinfo as structured records", version)]
struct Args {
    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, env = "ZONESTAT_PROC_PATH", default_value = DEFAULT_PROC_PATH)]
    proc_path: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// Only print records of this NUMA node.
    #[arg(short, long, value_name = "ID")]
    node: Option<String>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is warn level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["zonestat", "zonestat_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Keeps only the records of `node`.
fn filter_node(mut info: Zoneinfo, node: &str) -> Zoneinfo {
    info.nodes.retain(|n| n.node == node);
    info.zones.retain(|z| z.node == node);
    info
}

fn fmt_pages(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Renders the summary table.
fn render_summary(info: &Zoneinfo) -> String {
    let mut out = format!(
        "{:<5} {:<8} {:>12} {:>10} {:>10} {:>10} {:>12}\n",
        "NODE", "ZONE", "FREE", "MIN", "LOW", "HIGH", "MANAGED"
    );
    for zone in &info.zones {
        out.push_str(&format!(
            "{:<5} {:<8} {:>12} {:>10} {:>10} {:>10} {:>12}\n",
            zone.node,
            zone.zone,
            fmt_pages(zone.free),
            fmt_pages(zone.min),
            fmt_pages(zone.low),
            fmt_pages(zone.high),
            fmt_pages(zone.managed),
        ));
    }
    out
}

fn render(info: &Zoneinfo, format: Format) -> serde_json::Result<String> {
    match format {
        Format::Json => serde_json::to_string(info),
        Format::Pretty => serde_json::to_string_pretty(info),
        Format::Summary => Ok(render_summary(info)),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    debug!(proc_path = %args.proc_path, format = ?args.format, "zonestat starting");

    let collector = ZoneinfoCollector::new(RealFs::new(), &args.proc_path);
    let mut info = match collector.collect() {
        Ok(info) => info,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Some(node) = &args.node {
        info = filter_node(info, node);
    }

    let output = match render(&info, args.format) {
        Ok(output) => output,
        Err(e) => {
            error!("failed to serialize zoneinfo: {}", e);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", output.trim_end()) {
        // Broken pipe when piped into head etc.
        debug!("failed to write output: {}", e);
    }
}
