//! trend: spread of a sport trend through gossip and influencers.
//!
//! `trend run` simulates one population on a grid and writes
//! `model_reports.csv` / `agent_reports.csv`.  `trend sweep` batch-runs
//! population sizes × sport facility counts and prints the mean success
//! ratios per tick for one facility count.
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` (or `trace` for
//! per-agent events) to see more.

mod config;
mod sweep;

use std::path::PathBuf;
use std::time::Instant;

use abm_behavior::{IndirectChannel, SpreadModel, TrendModel};
use abm_output::{CsvWriter, SimOutputObserver, write_batch_records};
use abm_sim::SimBuilder;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use config::TrendConfig;

#[derive(Parser)]
#[command(name = "trend")]
#[command(about = "Trend spread on a grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only log warnings and errors (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation
    Run {
        /// TOML file with [sim] and [model] tables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the tick limit
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the number of uninformed persons
        #[arg(long)]
        population: Option<usize>,

        /// Override the number of sport facility cells
        #[arg(long)]
        facilities: Option<usize>,

        /// Override how influencers reach followers
        #[arg(long, value_enum)]
        channel: Option<ChannelArg>,

        /// Output directory
        #[arg(short, long, default_value = "output/trend")]
        output: PathBuf,
    },

    /// Batch-run population sizes × facility counts
    Sweep {
        /// Iterations per parameter set
        #[arg(long, default_value_t = 5)]
        iterations: u64,

        /// Tick limit per run
        #[arg(long, default_value_t = 20)]
        ticks: u64,

        /// Collect the model report every N ticks
        #[arg(long, default_value_t = 5)]
        period: u64,

        /// Seed of iteration 0; iteration i uses seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Facility count whose ratios are averaged
        #[arg(long, default_value_t = 9)]
        facility_count: usize,

        #[arg(long, value_enum, default_value_t = ChannelArg::FacilityEvent)]
        channel: ChannelArg,

        /// Worker threads (default: all cores)
        #[arg(long)]
        threads: Option<usize>,

        /// Output directory
        #[arg(short, long, default_value = "output/trend_sweep")]
        output: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ChannelArg {
    RandomFollowers,
    FacilityEvent,
}

impl From<ChannelArg> for IndirectChannel {
    fn from(c: ChannelArg) -> Self {
        match c {
            ChannelArg::RandomFollowers => IndirectChannel::RandomFollowers,
            ChannelArg::FacilityEvent   => IndirectChannel::FacilityEvent,
        }
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

    match cli.command {
        Commands::Run { config, seed, ticks, population, facilities, channel, output } => {
            let mut cfg = TrendConfig::load(config.as_deref())?;
            if let Some(seed) = seed {
                cfg.sim.seed = seed;
            }
            if let Some(ticks) = ticks {
                cfg.sim.max_ticks = ticks;
            }
            if let Some(n) = population {
                cfg.model.population_size = n;
            }
            if let Some(n) = facilities {
                cfg.model.sport_facilities = n;
            }
            if let Some(c) = channel {
                cfg.model.channel = c.into();
            }
            run(cfg, output)
        }
        Commands::Sweep { iterations, ticks, period, seed, facility_count, channel, threads, output } => {
            let mut plan = sweep::default_plan(channel.into());
            plan.iterations = iterations;
            plan.base_seed = seed;
            plan.settings.max_ticks = ticks;
            plan.settings.collection_period = period;
            plan.settings.num_threads = threads;
            run_sweep(&plan, facility_count, output)
        }
    }
}

fn run(cfg: TrendConfig, output: PathBuf) -> Result<()> {
    info!(
        seed = cfg.sim.seed,
        max_ticks = cfg.sim.max_ticks,
        population = cfg.model.population_size,
        facilities = cfg.model.sport_facilities,
        channel = ?cfg.model.channel,
        "building trend simulation"
    );
    let mut sim = SimBuilder::<TrendModel>::new(cfg.sim, cfg.model)
        .build()
        .context("Failed to build the simulation")?;

    let writer = CsvWriter::for_model::<TrendModel>(&output)
        .with_context(|| format!("Failed to open output in {}", output.display()))?;
    let mut obs = SimOutputObserver::new(writer);

    let t0 = Instant::now();
    let state = sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        bail!("output error: {e}");
    }

    let r = sim.model.report(sim.clock);
    info!(ticks = sim.clock.0, ?state, elapsed_ms = t0.elapsed().as_millis() as u64, "run complete");

    println!("Ticks executed        : {}", sim.clock.0);
    println!("Informed / uninformed : {} / {}", r.informed, r.uninformed);
    println!(
        "Direct   interactions : {:>5}  success ratio {:.3}",
        r.direct_interactions, r.direct_success_ratio
    );
    println!(
        "Indirect interactions : {:>5}  success ratio {:.3}",
        r.indirect_interactions, r.indirect_success_ratio
    );
    println!("Output                : {}", output.display());
    Ok(())
}

fn run_sweep(plan: &sweep::SweepPlan, facility_count: usize, output: PathBuf) -> Result<()> {
    if !plan.facilities.contains(&facility_count) {
        bail!(
            "facility count {facility_count} is not part of the sweep {:?}",
            plan.facilities
        );
    }

    let t0 = Instant::now();
    let records = plan.run().context("Batch run failed")?;
    info!(records = records.len(), elapsed_ms = t0.elapsed().as_millis() as u64, "sweep complete");

    std::fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_batch_records(&output.join("sweep_records.csv"), &records)?;

    let rows = sweep::average_ratios(&records, facility_count);
    sweep::print_table(&rows, facility_count);
    sweep::write_ratios(&output.join("mean_success_ratios.csv"), &rows)?;
    Ok(())
}
