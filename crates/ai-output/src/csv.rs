//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_trace.csv`
//! - `tick_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentTraceRow, OutputResult, TickSummaryRow};

/// Writes scene traces to two CSV files.
pub struct CsvWriter {
    trace:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files in it and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut trace = Writer::from_path(dir.join("agent_trace.csv"))?;
        trace.write_record(["tick", "agent", "kind", "state", "x", "y", "hp", "facing"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summary.csv"))?;
        summaries.write_record(["tick", "elapsed_ms", "is_night", "events", "player_damage", "kills"])?;

        Ok(Self {
            trace,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trace(&mut self, rows: &[AgentTraceRow]) -> OutputResult<()> {
        for row in rows {
            self.trace.write_record(&[
                row.tick.to_string(),
                row.agent.0.to_string(),
                row.kind.as_str().to_owned(),
                row.state.to_owned(),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                row.hit_points.to_string(),
                row.facing.as_str().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            (row.is_night as u8).to_string(),
            row.events.to_string(),
            row.player_damage.to_string(),
            row.kills.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
