//! Cell → agents bucket index.
//!
//! Built once from the initial positions and then kept current by
//! [`CellIndex::relocate`] on every move, so queries issued mid-tick see the
//! moves made earlier in the same tick.  Arrested agents stay indexed at the
//! cell where they were arrested.

use dm_core::{AgentId, GridBounds, GridPos};

use crate::CellMap;

/// Sparse occupancy index.  Only occupied cells have an entry.
#[derive(Clone, Debug, Default)]
pub struct CellIndex {
    cells: CellMap<Vec<AgentId>>,
}

impl CellIndex {
    /// Index `positions[i]` as the cell of `AgentId(i)`.
    pub fn build(positions: &[GridPos]) -> Self {
        let mut cells: CellMap<Vec<AgentId>> = CellMap::default();
        for (i, &pos) in positions.iter().enumerate() {
            cells.entry(pos).or_default().push(AgentId(i as u32));
        }
        Self { cells }
    }

    /// Agents in `cell`, in no particular order.
    #[inline]
    pub fn at(&self, cell: GridPos) -> &[AgentId] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of occupied cells.
    #[inline]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Move `agent` from bucket `from` to bucket `to`.
    pub fn relocate(&mut self, agent: AgentId, from: GridPos, to: GridPos) {
        if from == to {
            return;
        }
        if let Some(bucket) = self.cells.get_mut(&from) {
            if let Some(i) = bucket.iter().position(|&a| a == agent) {
                bucket.swap_remove(i);
            } else {
                debug_assert!(false, "{agent} not indexed at {from}");
            }
            if bucket.is_empty() {
                self.cells.remove(&from);
            }
        }
        self.cells.entry(to).or_default().push(agent);
    }

    /// All agents within Chebyshev distance `radius` of `center`, sorted by
    /// ascending id.  With `include_center == false`, agents exactly at
    /// `center` are left out.
    pub fn within(
        &self,
        center:         GridPos,
        radius:         u32,
        include_center: bool,
        bounds:         &GridBounds,
    ) -> Vec<AgentId> {
        let mut out = Vec::new();
        let r = radius.min(i32::MAX as u32) as i32;
        let side = 2 * radius as u64 + 1;

        if side.saturating_mul(side) <= self.cells.len() as u64 {
            // Small window: probe each cell of the square.
            for dx in -r..=r {
                for dy in -r..=r {
                    let cell = center.offset(dx, dy);
                    if !bounds.contains(cell) || (!include_center && cell == center) {
                        continue;
                    }
                    out.extend_from_slice(self.at(cell));
                }
            }
        } else {
            // Window larger than the occupied set: scan occupied cells instead.
            for (&cell, bucket) in &self.cells {
                if cell.chebyshev(center) > radius || (!include_center && cell == center) {
                    continue;
                }
                out.extend_from_slice(bucket);
            }
        }

        out.sort_unstable();
        out
    }
}
