//! `dm-sim` — the simulation controller for the drug-market model.
//!
//! # Sequential tick loop
//!
//! ```text
//! tick():
//!   if active_dealers == 0 → Complete (nothing changes, clock stays put)
//!   for agent in 0..N (ascending AgentId):
//!     skip if inactive
//!     ① Movement — BehaviorModel::movement → apply position
//!     ② Act      — BehaviorModel::act      → apply each Intent:
//!                    MoveTo          → reposition (overrides ①)
//!                    BecomeDrugUser  → role change, users += 1
//!                    Arrest(t)       → t inactive, dealers/users -= 1, arrests += 1
//!                    RecordPresence  → world presence += amount
//!                    SendMessage     → inbox + global log
//!   elapsed_ticks += 1
//! ```
//!
//! Intents are applied before the next agent runs, so every agent observes
//! the moves, conversions and arrests made earlier in the same tick.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | [`run_ensemble`] runs seeds on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the world's per-cell maps.                      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dm_core::{Population, SimConfig};
//! use dm_sim::{NoopObserver, Sim};
//!
//! let config = SimConfig::new(10, 10, Population::new(50, 5, 5, 2)).with_seed(7);
//! let mut sim = Sim::new(config)?;
//! while !sim.is_complete() && sim.elapsed_ticks() < 1_000 {
//!     sim.tick();
//! }
//! println!("arrests: {}", sim.arrest_count());
//! ```

pub mod builder;
pub mod counters;
pub mod ensemble;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use counters::Counters;
pub use ensemble::run_ensemble;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunSummary, Sim, TickStatus};
