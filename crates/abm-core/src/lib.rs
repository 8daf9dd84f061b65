//! `abm-core`: foundational types for the grid spread simulations.
//!
//! This crate is a dependency of every other `abm-*` crate.  It has no
//! `abm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                     |
//! |-----------|----------------------------------------------|
//! | [`ids`]   | `AgentId`, `CellId`                          |
//! | [`time`]  | `Tick`, `SimConfig`                          |
//! | [`rng`]   | `SimRng` (the single simulation-wide stream) |
//! | [`error`] | `CoreError`, `CoreResult`                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult, check_probability};
pub use ids::{AgentId, CellId};
pub use rng::SimRng;
pub use time::{SimConfig, Tick};
