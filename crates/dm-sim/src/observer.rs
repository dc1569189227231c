//! Simulation observer trait for progress reporting and data collection.

use dm_agent::{AgentStore, Message};
use dm_core::Tick;
use dm_spatial::World;

use crate::Counters;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at key points of the loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, counters: &Counters, _: &[Message]) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} dealers left", counters.active_dealers);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before a tick is processed.  Not called once the run is
    /// complete.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after a tick is processed.
    ///
    /// `sent` holds the messages logged during this tick, in send order.
    fn on_tick_end(&mut self, _tick: Tick, _counters: &Counters, _sent: &[Message]) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks) with read-only access to every agent.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once, after the tick in which the last dealer was arrested.
    fn on_complete(&mut self, _tick: Tick, _counters: &Counters) {}

    /// Called once when `run` returns.  `final_tick` is the number of
    /// elapsed ticks.
    fn on_sim_end(&mut self, _final_tick: Tick, _world: &World) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
