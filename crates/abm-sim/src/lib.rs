//! `abm-sim`: run-state machine and tick loop for the grid spread models.
//!
//! # Tick loop
//!
//! ```text
//! step():
//!   ① Guard    : nobody left to inform/infect → Stopped (tick not executed)
//!   ② Snapshot : observer.on_snapshot every output_interval_ticks
//!   ③ Phases   : SpreadModel::step (move, transmit, model specifics)
//!   ④ Advance  : clock += 1
//! ```
//!
//! [`Simulation::run`] repeats `step` until the run stops or `max_ticks`
//! ticks have executed.  [`batch::run_batch`] runs many simulations over a
//! parameter grid.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                            |
//! |------------|---------------------------------------------------|
//! | `parallel` | Batch jobs run on a Rayon thread pool.            |
//! | `serde`    | `Serialize`/`Deserialize` on `RunState` and params. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use abm_behavior::{TrendModel, TrendParams};
//! use abm_core::SimConfig;
//! use abm_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::<TrendModel>::new(SimConfig::default(), TrendParams::default())
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("stopped at {} after {:?}", sim.clock, sim.state());
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod state;

#[cfg(test)]
mod tests;

pub use batch::{BatchJob, BatchRecord, BatchSettings, expand_jobs, run_batch};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulation;
pub use state::RunState;
