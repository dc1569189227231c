//! `dm-behavior` — agent behavior model trait, intents, and role rules.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`intent`]  | `Intent` enum (`MoveTo`, `BecomeDrugUser`, `Arrest`, …)          |
//! | [`context`] | `SimContext<'a>` — read-only view handed to every rule call      |
//! | [`model`]   | `BehaviorModel` trait                                            |
//! | [`rules`]   | `DrugMarketRules` — the citizen/dealer/police/collector rules    |
//! | [`noop`]    | `NoopBehavior` — agents never move or act                        |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Design notes
//!
//! Rules never mutate anything.  For each active agent, in id order, dm-sim:
//!
//! 1. calls `BehaviorModel::movement` and applies the returned position;
//! 2. calls `BehaviorModel::act` and applies the returned intents;
//!
//! before moving on to the next agent.  Every call therefore sees the state
//! left by all agents activated before it in the same tick, and all writes
//! (roles, statuses, counters, presence, messages) happen in one place.

pub mod context;
pub mod error;
pub mod intent;
pub mod model;
pub mod noop;
pub mod rules;

#[cfg(test)]
mod tests;

pub use context::SimContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use rules::DrugMarketRules;
