//! The `OutputWriter` trait implemented by backend writers.

use abm_behavior::AgentRow;

use crate::OutputResult;

/// A sink for model and agent reporter rows.
///
/// Model reports arrive already flattened to strings so one writer serves
/// every model; the header row is fixed when the writer is created.
pub trait OutputWriter {
    /// Write one model report row.
    fn write_model_report(&mut self, fields: &[String]) -> OutputResult<()>;

    /// Write a batch of agent rows.
    fn write_agent_rows(&mut self, rows: &[AgentRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
