//! The `BehaviorModel` trait — the extension point for agent rules.

use dm_core::{AgentId, AgentRng, GridPos};

use crate::{Intent, SimContext};

/// Pluggable agent behavior.
///
/// Both methods are pure with respect to simulation state: they read through
/// the shared [`SimContext`] and draw randomness only from the acting agent's
/// own [`AgentRng`].  dm-sim calls them only for active agents.
///
/// # Example
///
/// ```rust,ignore
/// struct Wanderer;
///
/// impl BehaviorModel for Wanderer {
///     fn movement(&self, agent: AgentId, ctx: &SimContext, rng: &mut AgentRng) -> Option<GridPos> {
///         let here = ctx.agents.position(agent);
///         Some(ctx.world.clamp_to_bounds(here.x + rng.step(), here.y + rng.step()))
///     }
///
///     fn act(&self, _: AgentId, _: &SimContext, _: &mut AgentRng) -> Vec<Intent> {
///         vec![]
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Step 1: where the agent walks this tick.
    ///
    /// Return `None` to stay put.  A returned position must be in bounds.
    fn movement(
        &self,
        agent: AgentId,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Option<GridPos>;

    /// Step 2: role behavior, evaluated after step 1 has been applied.
    ///
    /// An empty `Vec` means "do nothing".
    fn act(
        &self,
        agent: AgentId,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Vec<Intent>;
}
