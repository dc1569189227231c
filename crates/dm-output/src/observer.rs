//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use dm_agent::{AgentStore, Message};
use dm_core::Tick;
use dm_sim::{Counters, SimObserver};
use dm_spatial::World;

use crate::row::{AgentSnapshotRow, HotspotRow, MessageRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries, messages, agent snapshots
/// and the final hotspot ranking to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
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
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, counters: &Counters, sent: &[Message]) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::new(tick.0, counters));
        self.store_err(result);

        if !sent.is_empty() {
            let rows: Vec<MessageRow> = sent.iter().map(MessageRow::from).collect();
            let result = self.writer.write_messages(&rows);
            self.store_err(result);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        let rows: Vec<AgentSnapshotRow> =
            agents.views().map(|v| AgentSnapshotRow::new(tick.0, &v)).collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, world: &World) {
        let rows: Vec<HotspotRow> = world
            .hotspots(world.presence().len())
            .iter()
            .enumerate()
            .map(|(i, h)| HotspotRow::new(i as u32 + 1, h))
            .collect();
        let result = self.writer.write_hotspots(&rows);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
