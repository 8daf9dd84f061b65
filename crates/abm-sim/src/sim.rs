//! The `Simulation` struct and its tick loop.

use abm_behavior::SpreadModel;
use abm_core::{SimConfig, SimRng, Tick};

use crate::{RunState, SimObserver, SimResult};

/// The main simulation runner.
///
/// `Simulation<M>` owns a spread model, the single RNG stream every phase
/// draws from, the clock and the run state.  Each [`step`](Self::step):
///
/// 1. **Guard**: if no person is left to inform/infect, switch to
///    [`RunState::Stopped`] and return without executing the tick.
/// 2. **Snapshot**: on every `output_interval_ticks`-th tick, hand the
///    untouched model to the observer.
/// 3. **Step**: run the model's phases.
/// 4. **Advance** the clock.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<M: SpreadModel> {
    pub config: SimConfig,

    /// The next tick to execute.  Equals the number of executed ticks.
    pub clock: Tick,

    pub model: M,

    state: RunState,
    rng:   SimRng,
}

impl<M: SpreadModel> Simulation<M> {
    pub(crate) fn new(config: SimConfig, model: M, rng: SimRng) -> Self {
        Self { config, clock: Tick::ZERO, model, state: RunState::Running, rng }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Execute one tick, or stop if there is nothing left to spread.
    ///
    /// Returns the state after the call.  Stepping a stopped simulation is a
    /// no-op.  A model error leaves the clock where it was.
    pub fn step<O: SimObserver<M>>(&mut self, observer: &mut O) -> SimResult<RunState> {
        if !self.state.is_running() {
            return Ok(self.state);
        }

        let now = self.clock;
        if self.model.susceptible_count() == 0 {
            self.state = RunState::Stopped;
            tracing::info!(tick = now.0, "everyone has been reached, stopping");
            observer.on_stop(now, &self.model);
            return Ok(self.state);
        }

        observer.on_tick_start(now);
        if now.is_on_interval(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.model);
        }
        self.model.step(now, &mut self.rng)?;
        observer.on_tick_end(now, &self.model);

        self.clock = now.next();
        Ok(self.state)
    }

    /// Step until the run stops or `config.max_ticks` ticks have executed.
    pub fn run<O: SimObserver<M>>(&mut self, observer: &mut O) -> SimResult<RunState> {
        while self.is_running() && self.clock < self.config.end_tick() {
            self.step(observer)?;
        }
        tracing::debug!(ticks = self.clock.0, state = ?self.state, "run finished");
        observer.on_sim_end(self.clock, &self.model);
        Ok(self.state)
    }

    /// Call [`step`](Self::step) up to `n` times, ignoring `max_ticks`.
    pub fn run_ticks<O: SimObserver<M>>(&mut self, n: u64, observer: &mut O) -> SimResult<RunState> {
        for _ in 0..n {
            if self.step(observer)? == RunState::Stopped {
                break;
            }
        }
        Ok(self.state)
    }
}
