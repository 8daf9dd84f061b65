//! Batch runner: many independent simulations over a parameter grid.
//!
//! Every job owns its model and RNG, so jobs share nothing and can run on
//! any thread.  Results come back in job order either way.

use abm_behavior::SpreadModel;
use abm_core::{SimConfig, Tick};

use crate::{SimBuilder, SimObserver, SimResult};

/// One simulation to run.
#[derive(Clone, Debug)]
pub struct BatchJob<P> {
    /// Index of the parameter set in the sweep.
    pub run_id:    usize,
    pub iteration: u64,
    pub seed:      u64,
    pub params:    P,
}

/// Expand `param_sets × iterations` into jobs, parameter set major.
///
/// Iteration `i` of every parameter set gets seed `base_seed + i`, so two
/// parameter sets compared at the same iteration share their seed.
pub fn expand_jobs<P: Clone>(param_sets: &[P], iterations: u64, base_seed: u64) -> Vec<BatchJob<P>> {
    param_sets
        .iter()
        .enumerate()
        .flat_map(|(run_id, params)| {
            (0..iterations).map(move |iteration| BatchJob {
                run_id,
                iteration,
                seed: base_seed.wrapping_add(iteration),
                params: params.clone(),
            })
        })
        .collect()
}

/// Run-level settings shared by every job of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchSettings {
    pub max_ticks: u64,
    /// Record the model report every N ticks.
    pub collection_period: u64,
    /// `None` uses all logical cores (only with the `parallel` feature).
    pub num_threads: Option<usize>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { max_ticks: 20, collection_period: 1, num_threads: None }
    }
}

impl BatchSettings {
    fn sim_config(&self, seed: u64) -> SimConfig {
        SimConfig {
            seed,
            max_ticks: self.max_ticks,
            output_interval_ticks: self.collection_period,
            num_threads: self.num_threads,
        }
    }
}

/// One collected model report.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchRecord<P, R> {
    pub run_id:    usize,
    pub iteration: u64,
    pub params:    P,
    pub tick:      u64,
    pub report:    R,
}

/// Collects `(tick, report)` pairs for a single job.
struct ReportCollector<R> {
    rows: Vec<(u64, R)>,
}

impl<R> ReportCollector<R> {
    fn last_tick(&self) -> Option<u64> {
        self.rows.last().map(|(t, _)| *t)
    }
}

impl<M: SpreadModel> SimObserver<M> for ReportCollector<M::Report> {
    fn on_snapshot(&mut self, tick: Tick, model: &M) {
        self.rows.push((tick.0, model.report(tick)));
    }

    /// The final state is always recorded, whether the run stopped early or
    /// hit `max_ticks`.
    fn on_sim_end(&mut self, final_tick: Tick, model: &M) {
        if self.last_tick() != Some(final_tick.0) {
            self.rows.push((final_tick.0, model.report(final_tick)));
        }
    }
}

fn run_job<M: SpreadModel>(
    job:      &BatchJob<M::Params>,
    settings: &BatchSettings,
) -> SimResult<Vec<BatchRecord<M::Params, M::Report>>> {
    let mut sim = SimBuilder::<M>::new(settings.sim_config(job.seed), job.params.clone()).build()?;
    let mut collector = ReportCollector { rows: Vec::new() };
    sim.run(&mut collector)?;

    tracing::debug!(
        run_id = job.run_id,
        iteration = job.iteration,
        ticks = sim.clock.0,
        "batch job finished"
    );

    Ok(collector
        .rows
        .into_iter()
        .map(|(tick, report)| BatchRecord {
            run_id:    job.run_id,
            iteration: job.iteration,
            params:    job.params.clone(),
            tick,
            report,
        })
        .collect())
}

/// Run every job and return all collected records, in job order.
///
/// With the `parallel` feature, jobs run on a dedicated Rayon pool sized by
/// `settings.num_threads`.
pub fn run_batch<M>(
    jobs:     &[BatchJob<M::Params>],
    settings: &BatchSettings,
) -> SimResult<Vec<BatchRecord<M::Params, M::Report>>>
where
    M: SpreadModel,
    M::Params: Send + Sync,
    M::Report: Send,
{
    settings.sim_config(0).validate()?;
    tracing::info!(jobs = jobs.len(), max_ticks = settings.max_ticks, "starting batch");

    #[cfg(not(feature = "parallel"))]
    let per_job: Vec<_> = jobs
        .iter()
        .map(|job| run_job::<M>(job, settings))
        .collect::<SimResult<_>>()?;

    #[cfg(feature = "parallel")]
    let per_job: Vec<_> = {
        use rayon::prelude::*;

        let mut pool = rayon::ThreadPoolBuilder::new();
        if let Some(n) = settings.num_threads {
            pool = pool.num_threads(n);
        }
        pool.build()?.install(|| {
            jobs.par_iter()
                .map(|job| run_job::<M>(job, settings))
                .collect::<SimResult<Vec<_>>>()
        })?
    };

    Ok(per_job.into_iter().flatten().collect())
}
