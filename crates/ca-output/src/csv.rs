//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_status.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentStatusRow, OutputResult, TickSummaryRow};

pub const STATUS_FILE: &str = "agent_status.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

const STATUS_HEADER: [&str; 8] =
    ["citizen_id", "tick", "state", "delay", "halted", "actions_done", "managed", "status"];
const SUMMARY_HEADER: [&str; 7] = ["tick", "elapsed_ms", "ran", "delayed", "blocked", "failed", "halted"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    status:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files in it and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut status = Writer::from_path(dir.join(STATUS_FILE))?;
        status.write_record(STATUS_HEADER)?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { status, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_status(&mut self, rows: &[AgentStatusRow]) -> OutputResult<()> {
        for row in rows {
            self.status.write_record(&[
                row.citizen_id.to_string(),
                row.tick.to_string(),
                row.state.clone(),
                row.delay.to_string(),
                (row.halted as u8).to_string(),
                row.actions_done.to_string(),
                row.managed.to_string(),
                row.status.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.ran.to_string(),
            row.delayed.to_string(),
            row.blocked.to_string(),
            row.failed.to_string(),
            row.halted.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.status.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
