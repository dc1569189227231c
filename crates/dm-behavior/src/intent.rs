//! Agent intents — the deltas a rule asks the controller to apply.

use dm_agent::MessageContent;
use dm_core::{AgentId, GridPos};

/// One change the acting agent wants made.
///
/// Intents are produced by [`BehaviorModel::act`][crate::BehaviorModel::act]
/// and applied by dm-sim in the order returned, immediately after the call.
/// Aggregate counters are not part of any intent: the controller derives them
/// from the role and status transitions it actually performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Move the acting agent to an in-bounds cell, overriding this tick's
    /// random step.
    MoveTo(GridPos),

    /// The acting citizen becomes a drug user.
    BecomeDrugUser,

    /// Arrest `target`, an active dealer or drug user.
    Arrest(AgentId),

    /// Add `amount` to the drug presence of `cell`.
    RecordPresence { cell: GridPos, amount: u64 },

    /// Deliver `content` to `to`'s inbox and the global message log.
    SendMessage { to: AgentId, content: MessageContent },
}
