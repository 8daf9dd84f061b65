//! The `SpreadModel` trait: the extension point `abm-sim` drives.

use abm_agent::Population;
use abm_core::{SimRng, Tick};
use abm_grid::Grid;

use crate::{AgentRow, BehaviorResult, ReportRow};

/// A spread model: population + grid + counters + a tick body.
///
/// The simulation loop owns the RNG and the running/stopped state.  It calls
/// [`susceptible_count`][Self::susceptible_count] before every tick and only
/// invokes [`step`][Self::step] while that count is non-zero.
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SimRng::new(42);
/// let mut model = TrendModel::build(&TrendParams::default(), &mut rng)?;
/// while model.susceptible_count() > 0 {
///     model.step(tick, &mut rng)?;
/// }
/// ```
pub trait SpreadModel: Sized {
    /// Construction parameters (population composition, probabilities, grid).
    type Params: Clone;

    /// Model-level reporter values for one tick.
    type Report: ReportRow + Clone;

    /// Validate `params`, create the population and place it on a new grid.
    ///
    /// All construction-time randomness (trait bucket sizes, placement,
    /// facility locations) is drawn from `rng`.
    fn build(params: &Self::Params, rng: &mut SimRng) -> BehaviorResult<Self>;

    /// Run one tick's phases.
    fn step(&mut self, now: Tick, rng: &mut SimRng) -> BehaviorResult<()>;

    fn population(&self) -> &Population;

    fn grid(&self) -> &Grid;

    /// Evaluate the model reporters.
    fn report(&self, tick: Tick) -> Self::Report;

    /// Persons not yet informed/infected.  Zero stops the run.
    fn susceptible_count(&self) -> usize {
        self.population().uninformed_count()
    }

    /// Evaluate the agent reporters, one row per agent in creation order.
    fn agent_rows(&self, tick: Tick) -> Vec<AgentRow> {
        let grid = self.grid();
        self.population()
            .iter()
            .map(|agent| {
                let coord = grid.coord_of(agent.id);
                AgentRow {
                    tick:     tick.0,
                    agent_id: agent.id.0,
                    role:     agent.role.name(),
                    informed: agent.is_informed(),
                    x:        coord.map(|c| c.x),
                    y:        coord.map(|c| c.y),
                    counter:  agent.role.counter(),
                }
            })
            .collect()
    }
}
