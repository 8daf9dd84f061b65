//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `model_reports.csv`
//! - `agent_reports.csv`
//!
//! plus [`write_batch_records`] for batch results.

use std::fs::{self, File};
use std::path::Path;

use abm_behavior::{AgentRow, ReportRow, SpreadModel};
use abm_sim::BatchRecord;
use csv::Writer;

use crate::OutputResult;
use crate::writer::OutputWriter;

pub const MODEL_REPORTS_FILE: &str = "model_reports.csv";
pub const AGENT_REPORTS_FILE: &str = "agent_reports.csv";

/// Writes reporter output to two CSV files.
pub struct CsvWriter {
    models:   Writer<File>,
    agents:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path, model_headers: &[&str]) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut models = Writer::from_path(dir.join(MODEL_REPORTS_FILE))?;
        models.write_record(model_headers)?;

        let mut agents = Writer::from_path(dir.join(AGENT_REPORTS_FILE))?;
        agents.write_record(AgentRow::headers())?;

        Ok(Self { models, agents, finished: false })
    }

    /// [`new`](Self::new) with the header row of `M`'s report.
    pub fn for_model<M: SpreadModel>(dir: &Path) -> OutputResult<Self> {
        Self::new(dir, M::Report::headers())
    }
}

impl OutputWriter for CsvWriter {
    fn write_model_report(&mut self, fields: &[String]) -> OutputResult<()> {
        self.models.write_record(fields)?;
        Ok(())
    }

    fn write_agent_rows(&mut self, rows: &[AgentRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(row.fields())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.models.flush()?;
        self.agents.flush()?;
        Ok(())
    }
}

/// Write batch records to `path`: `run_id`, `iteration`, the parameter
/// columns of `P`, then the report columns of `R`.
pub fn write_batch_records<P: ReportRow, R: ReportRow>(
    path:    &Path,
    records: &[BatchRecord<P, R>],
) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut w = Writer::from_path(path)?;

    let mut header = vec!["run_id", "iteration"];
    header.extend_from_slice(P::headers());
    header.extend_from_slice(R::headers());
    w.write_record(&header)?;

    for record in records {
        let mut fields = vec![record.run_id.to_string(), record.iteration.to_string()];
        fields.extend(record.params.fields());
        fields.extend(record.report.fields());
        w.write_record(&fields)?;
    }
    w.flush()?;
    tracing::debug!(rows = records.len(), path = %path.display(), "batch records written");
    Ok(())
}
