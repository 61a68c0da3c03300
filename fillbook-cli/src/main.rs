//! FillBook CLI — run the simulation kernel from files on disk.
//!
//! Commands:
//! - `run` — load bars (CSV) and intents (JSON), run one simulation,
//!   print a metrics summary, optionally write the full report as JSON
//! - `sweep` — run the same inputs across a TTL grid in parallel

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fillbook_core::fingerprint::fill_fingerprint;
use fillbook_core::sweep::ttl_sweep;
use fillbook_core::{
    run_simulation, BarArrays, KernelSelect, OrderIntent, SimConfig, SimReport,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fillbook", about = "FillBook — order-matching simulation kernel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and print its metrics.
    Run {
        /// CSV file with date,open,high,low,close columns.
        #[arg(long)]
        bars: PathBuf,

        /// JSON file with an array of order intents.
        #[arg(long)]
        intents: PathBuf,

        /// Optional TOML simulation config (ttl_bars, cost, kernel, max_fills).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Kernel override: production or reference.
        #[arg(long)]
        kernel: Option<String>,

        /// TTL override in bars (0 = good-till-cancelled).
        #[arg(long)]
        ttl: Option<u32>,

        /// Write the full report (fills + metrics) as JSON.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the same inputs across a TTL grid in parallel.
    Sweep {
        /// CSV file with date,open,high,low,close columns.
        #[arg(long)]
        bars: PathBuf,

        /// JSON file with an array of order intents.
        #[arg(long)]
        intents: PathBuf,

        /// Optional TOML simulation config used as the base for every run.
        #[arg(long)]
        config: Option<PathBuf>,

        /// TTL values to sweep, e.g. --ttl-grid 0,1,2,5.
        #[arg(long, value_delimiter = ',', required = true)]
        ttl_grid: Vec<u32>,
    },
}

/// One CSV row. The date column is parsed for range reporting only; the
/// kernel itself is purely index-based.
#[derive(Debug, Deserialize)]
struct BarRecord {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            bars,
            intents,
            config,
            kernel,
            ttl,
            output,
        } => run_cmd(&bars, &intents, config.as_deref(), kernel, ttl, output.as_deref()),
        Commands::Sweep {
            bars,
            intents,
            config,
            ttl_grid,
        } => sweep_cmd(&bars, &intents, config.as_deref(), &ttl_grid),
    }
}

fn run_cmd(
    bars_path: &Path,
    intents_path: &Path,
    config_path: Option<&Path>,
    kernel: Option<String>,
    ttl: Option<u32>,
    output: Option<&Path>,
) -> Result<()> {
    let (bars, dates) = load_bars(bars_path)?;
    let intents = load_intents(intents_path)?;
    let mut config = load_config(config_path)?;

    if let Some(name) = kernel {
        config.kernel = parse_kernel(&name)?;
    }
    if let Some(ttl_bars) = ttl {
        config.ttl_bars = ttl_bars;
    }

    log::info!(
        "running {:?} kernel over {} bars, {} intents, ttl_bars={}",
        config.kernel,
        bars.len(),
        intents.len(),
        config.ttl_bars
    );

    let report = run_simulation(&bars, &intents, &config)?;
    print_summary(&report, &dates);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}

fn sweep_cmd(
    bars_path: &Path,
    intents_path: &Path,
    config_path: Option<&Path>,
    ttl_grid: &[u32],
) -> Result<()> {
    let (bars, _) = load_bars(bars_path)?;
    let intents = load_intents(intents_path)?;
    let base = load_config(config_path)?;

    log::info!(
        "sweeping {} TTL values over {} bars, {} intents",
        ttl_grid.len(),
        bars.len(),
        intents.len()
    );

    let results = ttl_sweep(&bars, &intents, &base, ttl_grid)?;

    println!(
        "{:>8} {:>8} {:>14} {:>14} {:>8}",
        "ttl", "trades", "net_profit", "max_drawdown", "fills"
    );
    println!("{}", "-".repeat(58));
    for r in &results {
        let ttl_label = if r.ttl_bars == 0 {
            "GTC".to_string()
        } else {
            r.ttl_bars.to_string()
        };
        println!(
            "{:>8} {:>8} {:>14.2} {:>14.2} {:>8}",
            ttl_label,
            r.report.metrics.trades,
            r.report.metrics.net_profit,
            r.report.metrics.max_drawdown,
            r.report.fills.len()
        );
    }

    Ok(())
}

fn load_bars(path: &Path) -> Result<(BarArrays, Vec<NaiveDate>)> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening bars CSV {}", path.display()))?;

    let mut dates = Vec::new();
    let mut open = Vec::new();
    let mut high = Vec::new();
    let mut low = Vec::new();
    let mut close = Vec::new();
    for record in reader.deserialize() {
        let record: BarRecord = record.context("parsing bars CSV row")?;
        dates.push(record.date);
        open.push(record.open);
        high.push(record.high);
        low.push(record.low);
        close.push(record.close);
    }

    let bars = BarArrays::new(open, high, low, close)?;
    log::debug!("loaded {} bars from {}", bars.len(), path.display());
    Ok((bars, dates))
}

fn load_intents(path: &Path) -> Result<Vec<OrderIntent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading intents {}", path.display()))?;
    let intents: Vec<OrderIntent> =
        serde_json::from_str(&content).context("parsing intents JSON")?;
    log::debug!("loaded {} intents from {}", intents.len(), path.display());
    Ok(intents)
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        None => Ok(SimConfig::default()),
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&content).context("parsing simulation config TOML")
        }
    }
}

fn parse_kernel(name: &str) -> Result<KernelSelect> {
    match name {
        "production" => Ok(KernelSelect::Production),
        "reference" => Ok(KernelSelect::Reference),
        other => bail!("unknown kernel '{other}'. Valid: production, reference"),
    }
}

fn print_summary(report: &SimReport, dates: &[NaiveDate]) {
    println!();
    println!("=== Simulation Result ===");
    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        println!("Period:         {first} to {last}");
    }
    println!("Bars:           {}", dates.len());
    println!("Fills:          {}", report.fills.len());
    println!("Trades:         {}", report.metrics.trades);
    println!("Net Profit:     {:.2}", report.metrics.net_profit);
    println!("Max Drawdown:   {:.2}", report.metrics.max_drawdown);
    println!("Fingerprint:    {}", fill_fingerprint(&report.fills));
    println!();
}
