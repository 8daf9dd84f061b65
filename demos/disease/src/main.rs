//! disease: an infection spreading through direct contact and
//! contaminated cells.
//!
//! Writes `model_reports.csv` and `agent_reports.csv` to the output
//! directory and prints a per-tick infection table.

use std::path::{Path, PathBuf};

use abm_behavior::{DiseaseModel, DiseaseParams, DiseaseReport, SpreadModel};
use abm_core::{SimConfig, Tick};
use abm_output::{CsvWriter, SimOutputObserver};
use abm_sim::{SimBuilder, SimObserver};
use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Parser)]
#[command(name = "disease")]
#[command(about = "Infectious disease spread on a grid", long_about = None)]
struct Cli {
    /// TOML file with [sim] and [model] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    ticks: Option<u64>,

    /// Total persons
    #[arg(long)]
    population: Option<usize>,

    /// Persons infected at tick 0
    #[arg(long)]
    infected: Option<usize>,

    /// Susceptible persons with comorbidities
    #[arg(long)]
    comorbid: Option<usize>,

    #[arg(short, long, default_value = "output/disease")]
    output: PathBuf,

    /// Only log warnings and errors (RUST_LOG still wins)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct DiseaseConfig {
    sim:   SimConfig,
    model: DiseaseParams,
}

impl DiseaseConfig {
    fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

/// Forwards to the CSV observer and keeps every tick's report for the
/// summary table.
struct TableObserver<W: abm_output::OutputWriter> {
    inner: SimOutputObserver<W>,
    rows:  Vec<DiseaseReport>,
}

impl<W: abm_output::OutputWriter> SimObserver<DiseaseModel> for TableObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, model: &DiseaseModel) {
        self.inner.on_snapshot(tick, model);
    }

    fn on_tick_end(&mut self, tick: Tick, model: &DiseaseModel) {
        self.rows.push(model.report(tick.next()));
    }

    fn on_stop(&mut self, tick: Tick, model: &DiseaseModel) {
        self.inner.on_stop(tick, model);
    }

    fn on_sim_end(&mut self, final_tick: Tick, model: &DiseaseModel) {
        self.inner.on_sim_end(final_tick, model);
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let mut cfg = DiseaseConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        cfg.sim.seed = seed;
    }
    if let Some(ticks) = cli.ticks {
        cfg.sim.max_ticks = ticks;
    }
    if let Some(n) = cli.population {
        cfg.model.population_size = n;
    }
    if let Some(n) = cli.infected {
        cfg.model.infected = n;
    }
    if let Some(n) = cli.comorbid {
        cfg.model.comorbid = n;
    }

    info!(
        seed = cfg.sim.seed,
        population = cfg.model.population_size,
        infected = cfg.model.infected,
        comorbid = cfg.model.comorbid,
        "building disease simulation"
    );
    let mut sim = SimBuilder::<DiseaseModel>::new(cfg.sim, cfg.model)
        .build()
        .context("Failed to build the simulation")?;

    let writer = CsvWriter::for_model::<DiseaseModel>(&cli.output)
        .with_context(|| format!("Failed to open output in {}", cli.output.display()))?;
    let mut obs = TableObserver { inner: SimOutputObserver::new(writer), rows: Vec::new() };

    let state = sim.run(&mut obs)?;
    if let Some(e) = obs.inner.take_error() {
        bail!("output error: {e}");
    }
    info!(ticks = sim.clock.0, ?state, "run complete");

    println!(
        "{:>5} {:>9} {:>12} {:>7} {:>9} {:>13}",
        "tick", "infected", "susceptible", "direct", "location", "contaminated"
    );
    println!("{}", "-".repeat(60));
    for r in &obs.rows {
        println!(
            "{:>5} {:>9} {:>12} {:>7} {:>9} {:>13}",
            r.tick, r.infected, r.susceptible, r.direct_infections, r.location_infections,
            r.contaminated_cells
        );
    }
    println!();
    println!("Output: {}", cli.output.display());
    Ok(())
}
