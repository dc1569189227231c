//! `dm-spatial` — grid world state for the drug-market simulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`presence`]    | `PresenceMap` — sparse, never-decreasing score per cell  |
//! | [`occupancy`]   | `CellIndex` — cell → agents bucket index                 |
//! | [`world`]       | `World` — bounds + presence + occupancy, neighbor queries |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses `rustc_hash::FxHashMap` for the per-cell maps.     |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Hotspot`.         |

pub mod occupancy;
pub mod presence;
pub mod world;


pub use occupancy::CellIndex;
pub use presence::{Hotspot, PresenceMap};
pub use world::World;

#[cfg(feature = "fx-hash")]
pub(crate) type CellMap<V> = rustc_hash::FxHashMap<dm_core::GridPos, V>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type CellMap<V> = std::collections::HashMap<dm_core::GridPos, V>;
