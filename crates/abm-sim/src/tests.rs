//! Integration tests for abm-sim.

use abm_behavior::{SpreadModel, TrendModel, TrendParams};
use abm_core::{SimConfig, Tick};

use crate::SimObserver;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(max_ticks: u64) -> SimConfig {
    SimConfig {
        seed: 42,
        max_ticks,
        output_interval_ticks: 1,
        num_threads: Some(1),
    }
}

/// Four uninformed persons plus the informed seed on one cell, certain
/// gossip and no skepticism: everyone is informed after the first tick.
fn certain_trend() -> TrendParams {
    TrendParams {
        population_size: 4,
        sport_enthusiasts: Some(0),
        grid_width: 1,
        grid_height: 1,
        gossip_prob: 1.0,
        skepticism_prob: 0.0,
        ..TrendParams::default()
    }
}

/// Nobody ever adopts the trend, so the run only ends at `max_ticks`.
fn hopeless_trend() -> TrendParams {
    TrendParams { skepticism_prob: 1.0, facility_skepticism_prob: 1.0, ..TrendParams::default() }
}

/// Records every callback it receives.
#[derive(Default)]
struct Recorder {
    starts:    Vec<u64>,
    ends:      Vec<u64>,
    snapshots: Vec<u64>,
    stops:     Vec<u64>,
    sim_end:   Option<u64>,
}

impl<M: SpreadModel> SimObserver<M> for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick.0);
    }
    fn on_snapshot(&mut self, tick: Tick, _model: &M) {
        self.snapshots.push(tick.0);
    }
    fn on_tick_end(&mut self, tick: Tick, _model: &M) {
        self.ends.push(tick.0);
    }
    fn on_stop(&mut self, tick: Tick, _model: &M) {
        self.stops.push(tick.0);
    }
    fn on_sim_end(&mut self, final_tick: Tick, _model: &M) {
        self.sim_end = Some(final_tick.0);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use abm_behavior::{BehaviorError, DiseaseModel, DiseaseParams};
    use abm_core::CoreError;

    use super::*;
    use crate::{RunState, SimBuilder, SimError};

    #[test]
    fn builds_running_at_tick_zero() {
        let sim = SimBuilder::<TrendModel>::new(test_config(10), TrendParams::default())
            .build()
            .unwrap();
        assert_eq!(sim.clock, Tick::ZERO);
        assert_eq!(sim.state(), RunState::Running);
        assert!(sim.is_running());
    }

    #[test]
    fn zero_output_interval_rejected() {
        let config = SimConfig { output_interval_ticks: 0, ..test_config(10) };
        let result = SimBuilder::<TrendModel>::new(config, TrendParams::default()).build();
        assert!(matches!(result, Err(SimError::Core(CoreError::Config(_)))));
    }

    #[test]
    fn invalid_composition_rejected() {
        let params = DiseaseParams { population_size: 3, infected: 2, comorbid: 2, ..DiseaseParams::default() };
        let result = SimBuilder::<DiseaseModel>::new(test_config(10), params).build();
        assert!(matches!(result, Err(SimError::Behavior(BehaviorError::Config(_)))));
    }

    #[test]
    fn seed_override() {
        let sim = SimBuilder::<TrendModel>::new(test_config(10), TrendParams::default())
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(sim.config.seed, 7);
    }
}

// ── Run state machine ─────────────────────────────────────────────────────────

#[cfg(test)]
mod state_machine_tests {
    use super::*;
    use crate::{NoopObserver, RunState, SimBuilder};

    #[test]
    fn stops_on_the_step_after_everyone_is_informed() {
        let mut sim = SimBuilder::<TrendModel>::new(test_config(10), certain_trend())
            .build()
            .unwrap();
        let mut obs = Recorder::default();

        assert_eq!(sim.step(&mut obs).unwrap(), RunState::Running);
        assert_eq!(sim.clock, Tick(1));
        assert_eq!(sim.model.susceptible_count(), 0);
        assert!(sim.is_running());

        // Guard fires without executing tick 1.
        assert_eq!(sim.step(&mut obs).unwrap(), RunState::Stopped);
        assert_eq!(sim.clock, Tick(1));
        assert_eq!(obs.starts, vec![0]);
        assert_eq!(obs.stops, vec![1]);
    }

    #[test]
    fn stopped_is_terminal() {
        let mut sim = SimBuilder::<TrendModel>::new(test_config(10), certain_trend())
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(5, &mut obs).unwrap();
        assert_eq!(sim.state(), RunState::Stopped);

        let before = sim.model.report(sim.clock);
        assert_eq!(sim.step(&mut obs).unwrap(), RunState::Stopped);
        assert_eq!(sim.clock, Tick(1));
        assert_eq!(sim.model.report(sim.clock), before);
        assert_eq!(obs.stops.len(), 1);
    }

    #[test]
    fn five_agents_informed_within_population_minus_one_ticks() {
        let mut sim = SimBuilder::<TrendModel>::new(test_config(100), certain_trend())
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.state(), RunState::Stopped);
        assert!(sim.clock.0 <= 4);
        assert_eq!(sim.model.population().informed_count(), 5);
    }

    #[test]
    fn run_is_capped_by_max_ticks() {
        let mut sim = SimBuilder::<TrendModel>::new(test_config(7), hopeless_trend())
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        assert_eq!(sim.run(&mut obs).unwrap(), RunState::Running);
        assert_eq!(sim.clock, Tick(7));
        assert_eq!(obs.starts, (0..7).collect::<Vec<_>>());
        assert_eq!(obs.ends, (0..7).collect::<Vec<_>>());
        assert!(obs.stops.is_empty());
        assert_eq!(obs.sim_end, Some(7));
    }

    #[test]
    fn run_reports_early_stop() {
        let mut sim = SimBuilder::<TrendModel>::new(test_config(50), certain_trend())
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        assert_eq!(sim.run(&mut obs).unwrap(), RunState::Stopped);
        assert_eq!(obs.stops, vec![1]);
        assert_eq!(obs.sim_end, Some(1));
    }

    #[test]
    fn snapshots_follow_output_interval() {
        let config = SimConfig { output_interval_ticks: 3, ..test_config(7) };
        let mut sim = SimBuilder::<TrendModel>::new(config, hopeless_trend())
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.snapshots, vec![0, 3, 6]);
    }

    #[test]
    fn run_ticks_ignores_max_ticks() {
        let mut sim = SimBuilder::<TrendModel>::new(test_config(2), hopeless_trend())
            .build()
            .unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock, Tick(5));
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use abm_behavior::{DiseaseModel, DiseaseParams, DiseaseReport, TrendReport};

    use super::*;
    use crate::SimBuilder;

    struct Reports<R>(Vec<R>);

    impl<M: SpreadModel> SimObserver<M> for Reports<M::Report> {
        fn on_tick_end(&mut self, tick: Tick, model: &M) {
            self.0.push(model.report(tick.next()));
        }
    }

    fn trend_run(seed: u64) -> Vec<TrendReport> {
        let mut sim = SimBuilder::<TrendModel>::new(test_config(30), TrendParams::default())
            .seed(seed)
            .build()
            .unwrap();
        let mut reports = Reports(Vec::new());
        sim.run(&mut reports).unwrap();
        reports.0
    }

    fn disease_run(seed: u64) -> Vec<DiseaseReport> {
        let mut sim = SimBuilder::<DiseaseModel>::new(test_config(30), DiseaseParams::default())
            .seed(seed)
            .build()
            .unwrap();
        let mut reports = Reports(Vec::new());
        sim.run(&mut reports).unwrap();
        reports.0
    }

    #[test]
    fn same_seed_same_trend_sequence() {
        let a = trend_run(1234);
        assert!(!a.is_empty());
        assert_eq!(a, trend_run(1234));
    }

    #[test]
    fn same_seed_same_disease_sequence() {
        assert_eq!(disease_run(99), disease_run(99));
    }

    #[test]
    fn infections_never_revert() {
        let reports = disease_run(5);
        for pair in reports.windows(2) {
            assert!(pair[1].infected >= pair[0].infected);
            assert!(pair[1].direct_infections >= pair[0].direct_infections);
            assert!(pair[1].location_infections >= pair[0].location_infections);
        }
    }
}

// ── Scenarios built by hand ───────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use abm_agent::{Person, PopulationBuilder, Traits};
    use abm_behavior::{BehaviorError, DiseaseModel, DiseaseParams};
    use abm_core::{AgentId, CellId};
    use abm_grid::{Coord, Grid, GridError};

    use super::*;
    use crate::{NoopObserver, SimBuilder, SimError};

    fn quiet_disease() -> DiseaseParams {
        DiseaseParams {
            moving_prob: 0.0,
            direct_prob: 0.0,
            direct_prob_comorbid: 0.0,
            comorbid_location_bonus: 0.0,
            contaminated_cell_prob: 0.0,
            adjacent_cell_prob: 0.0,
            ..DiseaseParams::default()
        }
    }

    #[test]
    fn lone_infected_contaminates_its_cell() {
        let direct_certain = DiseaseParams { direct_prob: 1.0, ..quiet_disease() };
        let population = PopulationBuilder::new()
            .person(Person::new(Traits::default()).informed().with_moving_prob(0.0))
            .person(Person::new(Traits::default()).with_moving_prob(0.0))
            .build();
        let mut grid = Grid::new(3, 1, false).unwrap();
        grid.place(AgentId(0), Coord::new(0, 0)).unwrap();
        grid.place(AgentId(1), Coord::new(2, 0)).unwrap();
        let model = DiseaseModel::from_parts(direct_certain, population, grid);

        let mut sim = SimBuilder::from_model(test_config(10), model).unwrap();
        sim.step(&mut NoopObserver).unwrap();

        let report = sim.model.report(sim.clock);
        assert_eq!(report.infected, 1);
        assert_eq!(report.direct_infections, 0);
        assert!(sim.model.grid().cell(CellId(0)).contaminated);
        assert_eq!(report.contaminated_cells, 1);
    }

    #[test]
    fn not_placed_propagates_and_keeps_the_clock() {
        let population = PopulationBuilder::new().person(Person::default()).build();
        let grid = Grid::new(2, 2, true).unwrap();
        let model = TrendModel::from_parts(TrendParams::default(), population, grid);
        let mut sim = SimBuilder::from_model(test_config(10), model).unwrap();

        let err = sim.step(&mut NoopObserver).unwrap_err();
        assert!(matches!(
            err,
            SimError::Behavior(BehaviorError::Grid(GridError::NotPlaced { .. }))
        ));
        assert_eq!(sim.clock, Tick::ZERO);
        assert!(err.to_string().starts_with("the grid has not been initialized"));
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch_tests {
    use abm_behavior::DiseaseModel;

    use super::*;
    use crate::{BatchSettings, expand_jobs, run_batch};

    #[test]
    fn jobs_are_parameter_set_major_with_offset_seeds() {
        let jobs = expand_jobs(&["a", "b"], 3, 42);
        assert_eq!(jobs.len(), 6);
        let seeds: Vec<u64> = jobs.iter().map(|j| j.seed).collect();
        assert_eq!(seeds, vec![42, 43, 44, 42, 43, 44]);
        assert_eq!(jobs[3].run_id, 1);
        assert_eq!(jobs[3].iteration, 0);
        assert_eq!(jobs[3].params, "b");
    }

    #[test]
    fn collects_every_period_plus_final_tick() {
        let jobs = expand_jobs(&[hopeless_trend()], 2, 7);
        let settings = BatchSettings { max_ticks: 7, collection_period: 3, num_threads: Some(2) };
        let records = run_batch::<TrendModel>(&jobs, &settings).unwrap();

        let ticks: Vec<(u64, u64)> = records.iter().map(|r| (r.iteration, r.tick)).collect();
        assert_eq!(ticks, vec![(0, 0), (0, 3), (0, 6), (0, 7), (1, 0), (1, 3), (1, 6), (1, 7)]);
        assert!(records.iter().all(|r| r.report.tick == r.tick));
    }

    #[test]
    fn early_stop_records_stop_tick() {
        let jobs = expand_jobs(&[certain_trend()], 1, 1);
        let settings = BatchSettings { max_ticks: 20, collection_period: 5, num_threads: None };
        let records = run_batch::<TrendModel>(&jobs, &settings).unwrap();
        let ticks: Vec<u64> = records.iter().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![0, 1]);
        assert_eq!(records[1].report.uninformed, 0);
    }

    #[test]
    fn batch_is_reproducible_and_ordered() {
        let params = vec![
            abm_behavior::DiseaseParams::default(),
            abm_behavior::DiseaseParams { population_size: 20, ..Default::default() },
        ];
        let jobs = expand_jobs(&params, 3, 100);
        let settings = BatchSettings { max_ticks: 10, collection_period: 2, num_threads: Some(3) };

        let a = run_batch::<DiseaseModel>(&jobs, &settings).unwrap();
        let b = run_batch::<DiseaseModel>(&jobs, &settings).unwrap();
        assert_eq!(a, b);

        let order: Vec<(usize, u64)> = a.iter().map(|r| (r.run_id, r.iteration)).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn zero_collection_period_rejected() {
        let jobs = expand_jobs(&[TrendParams::default()], 1, 1);
        let settings = BatchSettings { collection_period: 0, ..BatchSettings::default() };
        assert!(run_batch::<TrendModel>(&jobs, &settings).is_err());
    }
}
