//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `tick_summaries.csv`
//! - `agent_snapshots.csv`
//! - `messages.csv`
//! - `hotspots.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::{AgentSnapshotRow, HotspotRow, MessageRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation reports to four CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    snapshots: Writer<File>,
    messages:  Writer<File>,
    hotspots:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the four CSV files in it
    /// and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "active_drug_users", "active_dealers", "arrests", "converted", "messages",
        ])?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(["agent_id", "tick", "role", "status", "x", "y", "trust_level"])?;

        let mut messages = Writer::from_path(dir.join("messages.csv"))?;
        messages.write_record(["message_id", "tick", "sender", "receiver", "content"])?;

        let mut hotspots = Writer::from_path(dir.join("hotspots.csv"))?;
        hotspots.write_record(["rank", "x", "y", "score"])?;

        Ok(Self {
            summaries,
            snapshots,
            messages,
            hotspots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.active_drug_users.to_string(),
            row.active_dealers.to_string(),
            row.arrests.to_string(),
            row.converted.to_string(),
            row.messages.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.role.to_owned(),
                row.status.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                // Empty cell for non-citizens.
                row.trust_level.map(|t| t.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_messages(&mut self, rows: &[MessageRow]) -> OutputResult<()> {
        for row in rows {
            self.messages.write_record(&[
                row.message_id.to_string(),
                row.tick.to_string(),
                row.sender.to_string(),
                row.receiver.to_string(),
                row.content.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_hotspots(&mut self, rows: &[HotspotRow]) -> OutputResult<()> {
        for row in rows {
            self.hotspots.write_record(&[
                row.rank.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.score.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        self.messages.flush()?;
        self.hotspots.flush()?;
        Ok(())
    }
}
