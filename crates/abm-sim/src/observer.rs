//! Simulation observer trait for progress reporting and data collection.

use abm_behavior::SpreadModel;
use abm_core::Tick;

/// Callbacks invoked by [`Simulation::step`][crate::Simulation::step] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl<M: SpreadModel> SimObserver<M> for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, model: &M) {
///         println!("{tick}: {} still susceptible", model.susceptible_count());
///     }
/// }
/// ```
pub trait SimObserver<M: SpreadModel> {
    /// Called at the start of each executed tick, before the snapshot.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called every `output_interval_ticks` ticks, before any agent acts.
    fn on_snapshot(&mut self, _tick: Tick, _model: &M) {}

    /// Called after the tick's phases have run.
    fn on_tick_end(&mut self, _tick: Tick, _model: &M) {}

    /// Called once, on the step that finds nobody left to inform.  `tick` is
    /// the tick that was *not* executed.
    fn on_stop(&mut self, _tick: Tick, _model: &M) {}

    /// Called once when [`Simulation::run`][crate::Simulation::run] returns.
    fn on_sim_end(&mut self, _final_tick: Tick, _model: &M) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<M: SpreadModel> SimObserver<M> for NoopObserver {}
