//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use abm_behavior::{ReportRow, SpreadModel};
use abm_core::Tick;
use abm_sim::SimObserver;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes model reports and agent rows to any
/// [`OutputWriter`] backend.
///
/// Every snapshot writes one model row and one row per agent.  The state
/// after the last executed tick always gets a final model row, whether the
/// run stopped early or reached `max_ticks`.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:      W,
    agent_rows:  bool,
    /// Tick of the most recent model row.
    last_tick:   Option<u64>,
    last_error:  Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, agent_rows: true, last_tick: None, last_error: None }
    }

    /// Skip the per-agent rows (model reports only).
    pub fn without_agent_rows(mut self) -> Self {
        self.agent_rows = false;
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_report<M: SpreadModel>(&mut self, tick: Tick, model: &M) {
        let result = self.writer.write_model_report(&model.report(tick).fields());
        self.last_tick = Some(tick.0);
        self.store_err(result);
    }
}

impl<M: SpreadModel, W: OutputWriter> SimObserver<M> for SimOutputObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, model: &M) {
        self.write_report(tick, model);
        if self.agent_rows {
            let result = self.writer.write_agent_rows(&model.agent_rows(tick));
            self.store_err(result);
        }
    }

    fn on_stop(&mut self, tick: Tick, model: &M) {
        self.write_report(tick, model);
    }

    fn on_sim_end(&mut self, final_tick: Tick, model: &M) {
        if self.last_tick != Some(final_tick.0) {
            self.write_report(final_tick, model);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
