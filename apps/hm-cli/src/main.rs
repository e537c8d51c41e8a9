//! he3-sim: lunar helium-3 haul simulator.
//!
//! Runs a fleet of mining trucks against a set of unloading stations for a
//! fixed horizon (72 h at 5 min/tick by default) and prints how each truck
//! spent its time and how many loads each station took.
//!
//! With `--trucks` and `--stations` the run is fully non-interactive.
//! Otherwise the missing values are asked for on stdin and, after each run,
//! the user can start another.

mod prompt;


use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hm_core::SimConfig;
use hm_output::{CsvWriter, SimOutputObserver, UtilizationReport};
use hm_sim::{NoopObserver, RunReport, SimBuilder};

use prompt::{Prompter, STATIONS_PROMPT, TRUCKS_PROMPT};

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "he3-sim", about = "Lunar helium-3 haul simulator")]
struct Cli {
    /// Number of mining trucks. Prompted for when omitted.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=65_535))]
    trucks: Option<u32>,

    /// Number of unloading stations. Prompted for when omitted.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=65_535))]
    stations: Option<u32>,

    /// Verify shortest-wait routing and ledger totals while running.
    #[arg(long)]
    debug: bool,

    /// Seed for mining durations; omit for a different run every time.
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate (default 864 = 72 h).
    #[arg(long)]
    ticks: Option<u64>,

    /// JSON file with `SimConfig` fields; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write CSV tables into this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write a truck snapshot every N ticks to the CSV output (0 = never).
    #[arg(long, value_name = "N")]
    snapshot_every: Option<u64>,

    /// Print the run report as JSON instead of text.  Prompts then go to
    /// stderr.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn interactive(&self) -> bool {
        self.trucks.is_none() || self.stations.is_none()
    }

    /// Layer the flags over `base`.  Counts not given stay as in `base`.
    fn apply(&self, mut base: SimConfig) -> SimConfig {
        if let Some(trucks) = self.trucks {
            base.fleet_size = trucks;
        }
        if let Some(stations) = self.stations {
            base.station_count = stations;
        }
        if let Some(ticks) = self.ticks {
            base.horizon_ticks = ticks;
        }
        if self.seed.is_some() {
            base.seed = self.seed;
        }
        if let Some(every) = self.snapshot_every {
            base.output_interval_ticks = every;
        }
        base.consistency_checks |= self.debug;
        base
    }
}

// ── Config and run ────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing config file: {}", path.display()))
}

fn simulate(config: &SimConfig, output_dir: Option<&Path>) -> Result<RunReport> {
    let mut sim = SimBuilder::from_config(config.clone())
        .build()
        .context("invalid simulation configuration")?;

    let Some(dir) = output_dir else {
        return Ok(sim.run(&mut NoopObserver)?);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory: {}", dir.display()))?;
    let writer = CsvWriter::new(dir)
        .with_context(|| format!("opening CSV output in {}", dir.display()))?;
    let mut obs = SimOutputObserver::new(writer, config);
    let report = sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).with_context(|| format!("writing output to {}", dir.display()));
    }
    Ok(report)
}

fn print_report(out: &mut impl Write, report: &RunReport, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report).context("serializing report")?;
        writeln!(out)?;
    } else {
        write!(out, "{}", UtilizationReport::new(report))?;
    }
    Ok(())
}

/// Prompt-driven loop: ask for whatever the flags left out, run, offer
/// another run.
fn interactive_loop<R: BufRead, W: Write>(
    cli: &Cli,
    base: &SimConfig,
    prompter: &mut Prompter<R, W>,
    out: &mut impl Write,
) -> Result<()> {
    loop {
        let mut config = cli.apply(base.clone());
        if cli.trucks.is_none() {
            config.fleet_size = prompter.count(TRUCKS_PROMPT)?;
        }
        if cli.stations.is_none() {
            config.station_count = prompter.count(STATIONS_PROMPT)?;
        }
        if !cli.debug {
            config.consistency_checks = prompter.debug_flag()?;
        }

        let report = simulate(&config, cli.output_dir.as_deref())?;
        print_report(out, &report, cli.json)?;

        if !prompter.run_again()? {
            return Ok(());
        }
    }
}

/// Where interactive prompts are written.  A JSON report owns stdout.
fn prompt_writer(json: bool) -> Box<dyn Write> {
    if json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let base = load_config(cli.config.as_deref())?;
    let mut stdout = io::stdout();

    if cli.interactive() {
        let mut prompter = Prompter::new(io::stdin().lock(), prompt_writer(cli.json));
        return interactive_loop(&cli, &base, &mut prompter, &mut stdout);
    }

    let config = cli.apply(base);
    let report = simulate(&config, cli.output_dir.as_deref())?;
    print_report(&mut stdout, &report, cli.json)
}
