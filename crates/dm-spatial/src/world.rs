//! The `World`: fixed bounds, the presence map, and the occupancy index.

use dm_core::{AgentId, GridBounds, GridPos};

use crate::{CellIndex, Hotspot, PresenceMap};

/// Shared spatial state of one run.
///
/// Dimensions are fixed for the lifetime of the value.  The presence map is
/// only ever incremented.  Occupancy mirrors the agents' positions and must be
/// updated through [`World::relocate`] whenever an agent moves.
#[derive(Clone, Debug)]
pub struct World {
    bounds:    GridBounds,
    presence:  PresenceMap,
    occupancy: CellIndex,
}

impl World {
    /// A world with no presence recorded and agent `i` at `positions[i]`.
    pub fn new(bounds: GridBounds, positions: &[GridPos]) -> Self {
        debug_assert!(positions.iter().all(|&p| bounds.contains(p)));
        Self {
            bounds,
            presence:  PresenceMap::new(),
            occupancy: CellIndex::build(positions),
        }
    }

    #[inline]
    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.bounds.contains(pos)
    }

    /// Clip a candidate coordinate into `[0, width) × [0, height)`.
    #[inline]
    pub fn clamp_to_bounds(&self, x: i32, y: i32) -> GridPos {
        self.bounds.clamp(GridPos::new(x, y))
    }

    // ── Neighbor queries ──────────────────────────────────────────────────

    /// Every agent (any role or status) within Chebyshev distance `radius` of
    /// `position`, in ascending id order.  `radius == 1` is the Moore
    /// neighborhood; `include_center == false` drops agents exactly at
    /// `position`.
    pub fn neighbors(&self, position: GridPos, radius: u32, include_center: bool) -> Vec<AgentId> {
        self.occupancy.within(position, radius, include_center, &self.bounds)
    }

    /// Agents in exactly `position`, in ascending id order.
    pub fn agents_at(&self, position: GridPos) -> Vec<AgentId> {
        let mut out = self.occupancy.at(position).to_vec();
        out.sort_unstable();
        out
    }

    /// Record that `agent` moved from `from` to `to`.
    pub fn relocate(&mut self, agent: AgentId, from: GridPos, to: GridPos) {
        debug_assert!(self.bounds.contains(to), "{agent} moved off-grid to {to}");
        self.occupancy.relocate(agent, from, to);
    }

    // ── Presence ──────────────────────────────────────────────────────────

    /// Add `amount` to the presence score of `position`.
    pub fn record_presence(&mut self, position: GridPos, amount: u64) {
        self.presence.record(position, amount);
    }

    /// Presence at `position`, 0 for cells never recorded.
    #[inline]
    pub fn presence_at(&self, position: GridPos) -> u64 {
        self.presence.get(position)
    }

    #[inline]
    pub fn presence(&self) -> &PresenceMap {
        &self.presence
    }

    /// The `n` highest-presence cells.
    pub fn hotspots(&self, n: usize) -> Vec<Hotspot> {
        self.presence.hotspots(n)
    }
}
