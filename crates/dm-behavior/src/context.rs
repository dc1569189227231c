//! Read-only simulation state passed to every behavior callback.

use dm_agent::{AgentStore, Role};
use dm_core::{AgentId, GridPos, InteractionScope, Tick};
use dm_spatial::World;

/// A read-only view of the simulation handed to each
/// [`BehaviorModel`][crate::BehaviorModel] call.
///
/// dm-sim rebuilds it for every call, so it always reflects the writes made
/// for agents activated earlier in the same tick.
pub struct SimContext<'a> {
    /// Tick being processed.
    pub tick: Tick,

    /// Every agent's role, status, position and inbox.
    pub agents: &'a AgentStore,

    /// Bounds, presence map and occupancy index.
    pub world: &'a World,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(tick: Tick, agents: &'a AgentStore, world: &'a World) -> Self {
        Self { tick, agents, world }
    }

    /// Agents other than `agent` visible from `at` under `scope`, ascending.
    pub fn visible(&self, agent: AgentId, at: GridPos, scope: InteractionScope) -> Vec<AgentId> {
        let (radius, include_center) = scope.query();
        let mut seen = self.world.neighbors(at, radius, include_center);
        seen.retain(|&other| other != agent);
        seen
    }

    /// Active agents other than `agent` visible from `at` whose role
    /// satisfies `pred`, ascending.
    pub fn visible_active(
        &self,
        agent: AgentId,
        at:    GridPos,
        scope: InteractionScope,
        pred:  impl Fn(&Role) -> bool,
    ) -> Vec<AgentId> {
        let mut seen = self.visible(agent, at, scope);
        seen.retain(|&other| self.agents.is_active(other) && pred(&self.agents.role(other)));
        seen
    }
}
