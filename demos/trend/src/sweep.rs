//! Parameter sweep: population sizes × facility counts, averaged success
//! ratios per (population, tick) for one facility count.

use std::collections::BTreeMap;
use std::path::Path;

use abm_behavior::{IndirectChannel, TrendModel, TrendParams, TrendReport};
use abm_sim::{BatchRecord, BatchSettings, expand_jobs, run_batch};
use anyhow::{Context, Result};

pub struct SweepPlan {
    pub populations:  Vec<usize>,
    pub facilities:   Vec<usize>,
    pub base:         TrendParams,
    pub iterations:   u64,
    pub base_seed:    u64,
    pub settings:     BatchSettings,
}

impl SweepPlan {
    fn param_sets(&self) -> Vec<TrendParams> {
        self.populations
            .iter()
            .flat_map(|&population_size| {
                self.facilities.iter().map(move |&sport_facilities| TrendParams {
                    population_size,
                    sport_facilities,
                    ..self.base.clone()
                })
            })
            .collect()
    }

    pub fn run(&self) -> Result<Vec<BatchRecord<TrendParams, TrendReport>>> {
        let jobs = expand_jobs(&self.param_sets(), self.iterations, self.base_seed);
        Ok(run_batch::<TrendModel>(&jobs, &self.settings)?)
    }
}

/// Mean success ratios of one (population, tick) group.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioRow {
    pub population_size: usize,
    pub tick:            u64,
    pub direct:          f64,
    pub indirect:        f64,
    pub samples:         usize,
}

/// Average the ratio reporters over iterations for `facility_count`.
pub fn average_ratios(
    records:        &[BatchRecord<TrendParams, TrendReport>],
    facility_count: usize,
) -> Vec<RatioRow> {
    let mut groups: BTreeMap<(usize, u64), (f64, f64, usize)> = BTreeMap::new();
    for r in records.iter().filter(|r| r.params.sport_facilities == facility_count) {
        let g = groups.entry((r.params.population_size, r.tick)).or_default();
        g.0 += r.report.direct_success_ratio;
        g.1 += r.report.indirect_success_ratio;
        g.2 += 1;
    }
    groups
        .into_iter()
        .map(|((population_size, tick), (direct, indirect, n))| RatioRow {
            population_size,
            tick,
            direct: direct / n as f64,
            indirect: indirect / n as f64,
            samples: n,
        })
        .collect()
}

pub fn print_table(rows: &[RatioRow], facility_count: usize) {
    println!("Mean success ratios, {facility_count} sport facilities");
    println!("{:>10} {:>6} {:>10} {:>10} {:>8}", "population", "tick", "direct", "indirect", "samples");
    println!("{}", "-".repeat(48));
    for r in rows {
        println!(
            "{:>10} {:>6} {:>10.3} {:>10.3} {:>8}",
            r.population_size, r.tick, r.direct, r.indirect, r.samples
        );
    }
}

pub fn write_ratios(path: &Path, rows: &[RatioRow]) -> Result<()> {
    let mut w = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    w.write_record(["population_size", "tick", "direct_success_ratio", "indirect_success_ratio", "samples"])?;
    for r in rows {
        w.write_record([
            r.population_size.to_string(),
            r.tick.to_string(),
            r.direct.to_string(),
            r.indirect.to_string(),
            r.samples.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Sweep defaults used by the `sweep` subcommand.
pub fn default_plan(channel: IndirectChannel) -> SweepPlan {
    SweepPlan {
        populations: vec![10, 30, 50],
        facilities:  (1..10).step_by(2).collect(),
        base:        TrendParams { channel, ..TrendParams::default() },
        iterations:  5,
        base_seed:   42,
        settings:    BatchSettings { max_ticks: 20, collection_period: 5, num_threads: None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_fifteen_parameter_sets() {
        let plan = default_plan(IndirectChannel::FacilityEvent);
        assert_eq!(plan.facilities, vec![1, 3, 5, 7, 9]);
        assert_eq!(plan.param_sets().len(), 15);
    }

    #[test]
    fn averages_only_the_requested_facility_count() {
        let plan = SweepPlan {
            populations: vec![10],
            facilities:  vec![1, 9],
            iterations:  3,
            settings:    BatchSettings { max_ticks: 10, collection_period: 5, num_threads: Some(1) },
            ..default_plan(IndirectChannel::RandomFollowers)
        };
        let records = plan.run().unwrap();
        let rows = average_ratios(&records, 9);

        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.population_size == 10));
        assert_eq!(rows[0].tick, 0);
        assert_eq!(rows[0].samples, 3);
        assert!(rows.iter().all(|r| (0.0..=1.0).contains(&r.direct)));
    }
}
