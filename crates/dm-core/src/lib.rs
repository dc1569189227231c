//! `dm-core` — foundational types for the drug-market simulation.
//!
//! This crate is a dependency of every other `dm-*` crate.  It has no `dm-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `MessageId`                                |
//! | [`grid`]        | `GridPos`, `GridBounds`, Moore offsets                |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `SimConfig`, `Population`, `RuleSet` and variants     |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `DmError`, `DmResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{InteractionScope, MovementPolicy, Population, RuleSet, SimConfig};
pub use error::{DmError, DmResult};
pub use grid::{GridBounds, GridPos, MOORE_BLOCK};
pub use ids::{AgentId, MessageId};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
