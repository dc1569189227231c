//! `dm-output` — report writers for the drug-market simulation.
//!
//! The CSV backend creates four files in the output directory:
//!
//! | File                  | Written                         | One row per                 |
//! |-----------------------|---------------------------------|-----------------------------|
//! | `tick_summaries.csv`  | after every tick                | tick                        |
//! | `agent_snapshots.csv` | every `snapshot_interval_ticks` | agent per snapshot          |
//! | `messages.csv`        | after every tick                | data-collector message      |
//! | `hotspots.csv`        | once, at the end of the run     | cell with non-zero presence |
//!
//! Reports are write-only analytics; nothing here reads them back into a
//! simulation.
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `dm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, HotspotRow, MessageRow, TickSummaryRow};
pub use writer::OutputWriter;
