//! `dm-agent` — population storage for the drug-market simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`role`]      | `Role` (closed tagged union), `RoleKind`, `Status`          |
//! | [`message`]   | `Message`, `MessageContent`                                 |
//! | [`store`]     | `AgentStore` (SoA arrays), `AgentRngs`, `AgentView`         |
//! | [`builder`]   | `AgentStoreBuilder` (random population or explicit roster)  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types. |

pub mod builder;
pub mod message;
pub mod role;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use message::{Message, MessageContent};
pub use role::{Role, RoleKind, Status};
pub use store::{AgentRngs, AgentStore, AgentView};
