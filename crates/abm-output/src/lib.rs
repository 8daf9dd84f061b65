//! `abm-output`: CSV data collection for the grid spread simulations.
//!
//! | File                 | One row per                          |
//! |----------------------|--------------------------------------|
//! | `model_reports.csv`  | snapshot tick (plus the stop tick)   |
//! | `agent_reports.csv`  | agent per snapshot tick              |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `abm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use abm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::for_model::<TrendModel>(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::{AGENT_REPORTS_FILE, CsvWriter, MODEL_REPORTS_FILE, write_batch_records};
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use writer::OutputWriter;
