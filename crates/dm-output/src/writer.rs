//! The `OutputWriter` trait implemented by report backends.

use crate::{AgentSnapshotRow, HotspotRow, MessageRow, OutputResult, TickSummaryRow};

/// A sink for simulation reports.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// stores them for retrieval with `take_error`.
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write the messages sent during one tick.
    fn write_messages(&mut self, rows: &[MessageRow]) -> OutputResult<()>;

    /// Write the final hotspot ranking.
    fn write_hotspots(&mut self, rows: &[HotspotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
