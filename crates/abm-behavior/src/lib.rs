//! `abm-behavior`: what agents do each tick, and the two models built on it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`model`]    | `SpreadModel` trait: the contract `abm-sim` drives            |
//! | [`actions`]  | Shared agent operations: random placement, `move`              |
//! | [`counters`] | `InteractionCounters`, `InfectionCounters`, `success_ratio`    |
//! | [`report`]   | `ReportRow` trait, `AgentRow`                                  |
//! | [`trend`]    | `TrendModel`: gossip plus influencer broadcast                |
//! | [`disease`]  | `DiseaseModel`: direct and location infection, cell decay     |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Design notes
//!
//! A model owns its population, its grid, and its counters.  It does *not*
//! own the RNG or the run state: `abm-sim` threads one `SimRng` through every
//! `step` call and evaluates the stop condition before calling it.  Within a
//! step, phases run over the whole population in creation order and later
//! phases see what earlier phases changed.

pub mod actions;
pub mod counters;
pub mod disease;
pub mod error;
pub mod model;
pub mod report;
pub mod trend;


pub use counters::{Channel, InfectionCounters, InfectionRoute, InteractionCounters, success_ratio};
pub use disease::{DiseaseModel, DiseaseParams, DiseaseReport};
pub use error::{BehaviorError, BehaviorResult};
pub use model::SpreadModel;
pub use report::{AgentRow, ReportRow};
pub use trend::{IndirectChannel, TrendModel, TrendParams, TrendReport};
