//! headless — terminal runner for the drug-market simulation.
//!
//! Builds a run from defaults, an optional JSON config file and command-line
//! overrides (in that order), runs it to completion or the tick limit, and
//! prints the final counters, the most recent messages and the strongest
//! hotspots.  With `--output DIR` the CSV reports are written as well; with
//! `--ensemble 1,2,3` one run per seed is made and summarised instead.
//!
//! ```text
//! headless --ticks 500 --seed 7 --output ./out
//! headless --config run.json --scope moore --dealer-evasion
//! headless --ticks 300 --ensemble 1,2,3,4
//! RUST_LOG=debug headless --width 10 --height 10 --citizens 50
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dm_agent::{AgentStore, Message};
use dm_core::{InteractionScope, MovementPolicy, SimConfig, Tick};
use dm_output::{CsvWriter, SimOutputObserver};
use dm_sim::{run_ensemble, Counters, RunSummary, Sim, SimObserver};
use dm_spatial::World;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Tick limit when neither the config file nor `--ticks` sets one.
const DEFAULT_TICKS:     u64   = 1_000;
const PROGRESS_INTERVAL: u64   = 100;
const RECENT_MESSAGES:   usize = 5;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ScopeArg {
    SameCell,
    Moore,
}

impl From<ScopeArg> for InteractionScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::SameCell => InteractionScope::SameCell,
            ScopeArg::Moore    => InteractionScope::Moore,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MovementArg {
    Clamp,
    Discard,
}

impl From<MovementArg> for MovementPolicy {
    fn from(arg: MovementArg) -> Self {
        match arg {
            MovementArg::Clamp   => MovementPolicy::Clamp,
            MovementArg::Discard => MovementPolicy::Discard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the drug-market simulation without a UI", long_about = None)]
struct Cli {
    /// JSON file with a full or partial `SimConfig`.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    citizens: Option<usize>,
    #[arg(long)]
    dealers: Option<usize>,
    #[arg(long)]
    police: Option<usize>,
    #[arg(long)]
    data_collectors: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of ticks to run.
    #[arg(long)]
    ticks: Option<u64>,

    /// Write an agent snapshot every N ticks (0 disables).
    #[arg(long)]
    snapshot_interval: Option<u64>,

    #[arg(long, value_enum)]
    scope: Option<ScopeArg>,
    #[arg(long, value_enum)]
    movement: Option<MovementArg>,

    /// Dealers step away from co-located police and data collectors.
    #[arg(long)]
    dealer_evasion: bool,

    /// Directory for the CSV reports.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Run one simulation per seed and print a summary table.
    #[arg(long, value_delimiter = ',')]
    ensemble: Vec<u64>,

    /// Number of hotspots to print.
    #[arg(long, default_value_t = 5)]
    hotspots: usize,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags.
    fn resolve_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SimConfig::default(),
        };

        if let Some(v) = self.width { config.width = v; }
        if let Some(v) = self.height { config.height = v; }
        if let Some(v) = self.citizens { config.population.citizens = v; }
        if let Some(v) = self.dealers { config.population.dealers = v; }
        if let Some(v) = self.police { config.population.police = v; }
        if let Some(v) = self.data_collectors { config.population.data_collectors = v; }
        if let Some(v) = self.seed { config.seed = v; }
        if let Some(v) = self.snapshot_interval { config.snapshot_interval_ticks = v; }
        if let Some(v) = self.scope { config.rules.interaction = v.into(); }
        if let Some(v) = self.movement { config.rules.movement = v.into(); }
        if self.dealer_evasion {
            config.rules.dealer_evasion = true;
        }

        config.max_ticks = self.ticks.or(config.max_ticks).or(Some(DEFAULT_TICKS));
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs progress and forwards everything to the CSV observer when one is
/// configured.
struct HeadlessObserver {
    reports: Option<SimOutputObserver<CsvWriter>>,
}

impl SimObserver for HeadlessObserver {
    fn on_tick_end(&mut self, tick: Tick, counters: &Counters, sent: &[Message]) {
        if tick.0 % PROGRESS_INTERVAL == 0 {
            info!(
                tick    = tick.0,
                users   = counters.active_drug_users,
                dealers = counters.active_dealers,
                arrests = counters.arrests,
                "progress"
            );
        }
        if let Some(r) = &mut self.reports {
            r.on_tick_end(tick, counters, sent);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        if let Some(r) = &mut self.reports {
            r.on_snapshot(tick, agents);
        }
    }

    fn on_complete(&mut self, tick: Tick, counters: &Counters) {
        info!(tick = tick.0, arrests = counters.arrests, "every dealer arrested");
    }

    fn on_sim_end(&mut self, final_tick: Tick, world: &World) {
        if let Some(r) = &mut self.reports {
            r.on_sim_end(final_tick, world);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    println!("=== headless — drug-market simulation ===");
    println!(
        "Grid: {}×{}  |  Citizens: {}  Dealers: {}  Police: {}  Data collectors: {}  |  Seed: {}",
        config.width,
        config.height,
        config.population.citizens,
        config.population.dealers,
        config.population.police,
        config.population.data_collectors,
        config.seed,
    );
    println!();

    if !cli.ensemble.is_empty() {
        let summaries = run_ensemble(&config, &cli.ensemble)?;
        print_ensemble(&summaries);
        return Ok(());
    }

    let mut sim = Sim::new(config)?;

    let reports = match &cli.output {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("creating reports in {}", dir.display()))?;
            Some(SimOutputObserver::new(writer))
        }
        None => None,
    };
    let mut observer = HeadlessObserver { reports };
    let summary = sim.run(&mut observer);

    if let Some(mut reports) = observer.reports.take() {
        if let Some(e) = reports.take_error() {
            return Err(e).context("writing reports");
        }
    }

    print_counters(&summary);
    println!();
    println!("Last {RECENT_MESSAGES} messages:");
    for m in sim.recent_messages(RECENT_MESSAGES) {
        println!("  {m}");
    }
    println!();
    println!("Top hotspots:");
    for (rank, h) in sim.world().hotspots(cli.hotspots).iter().enumerate() {
        println!("  {:>2}. {}  score {}", rank + 1, h.cell, h.score);
    }
    if let Some(dir) = &cli.output {
        println!();
        println!("Reports written to {}", dir.display());
    }
    Ok(())
}

fn print_counters(summary: &RunSummary) {
    let c = &summary.counters;
    println!("Ticks elapsed:      {}", c.elapsed_ticks);
    println!("Active drug users:  {}", c.active_drug_users);
    println!("Active dealers:     {}", c.active_dealers);
    println!("Arrests:            {}", c.arrests);
    println!("Citizens converted: {}", c.converted);
    println!("Messages sent:      {}", c.messages);
    println!(
        "Outcome:            {}",
        if summary.completed { "all dealers arrested" } else { "tick limit reached" }
    );
}

fn print_ensemble(summaries: &[RunSummary]) {
    println!(
        "{:>20}  {:>6}  {:>6}  {:>8}  {:>8}  {:>9}  {:>9}",
        "seed", "ticks", "users", "dealers", "arrests", "converted", "completed"
    );
    for s in summaries {
        let c = &s.counters;
        println!(
            "{:>20}  {:>6}  {:>6}  {:>8}  {:>8}  {:>9}  {:>9}",
            s.seed, c.elapsed_ticks, c.active_drug_users, c.active_dealers, c.arrests, c.converted,
            s.completed
        );
    }
    let done = summaries.iter().filter(|s| s.completed).count();
    println!();
    println!("{done}/{} runs arrested every dealer", summaries.len());
}
