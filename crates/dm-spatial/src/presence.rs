//! Sparse per-cell drug-presence scores.

use dm_core::GridPos;

use crate::CellMap;

/// One scored cell, as reported by [`PresenceMap::hotspots`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hotspot {
    pub cell:  GridPos,
    pub score: u64,
}

/// Accumulated drug presence per cell.
///
/// Absent cells read as 0.  Scores only ever grow: there is no decrement,
/// decay or reset within a run.
#[derive(Clone, Debug, Default)]
pub struct PresenceMap {
    scores: CellMap<u64>,
    total:  u64,
}

impl PresenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `cell`.  A zero amount leaves the map untouched (no
    /// zero-valued entry is created).
    pub fn record(&mut self, cell: GridPos, amount: u64) {
        if amount == 0 {
            return;
        }
        let score = self.scores.entry(cell).or_insert(0);
        *score = score.saturating_add(amount);
        self.total = self.total.saturating_add(amount);
    }

    /// Score at `cell`, 0 if never recorded.
    #[inline]
    pub fn get(&self, cell: GridPos) -> u64 {
        self.scores.get(&cell).copied().unwrap_or(0)
    }

    /// Number of cells with a non-zero score.
    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sum of all scores.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Every scored cell, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, u64)> + '_ {
        self.scores.iter().map(|(&c, &s)| (c, s))
    }

    /// The `n` highest-scoring cells, by descending score then ascending
    /// `(x, y)`.
    pub fn hotspots(&self, n: usize) -> Vec<Hotspot> {
        let mut all: Vec<Hotspot> = self
            .iter()
            .map(|(cell, score)| Hotspot { cell, score })
            .collect();
        all.sort_unstable_by(|a, b| b.score.cmp(&a.score).then(a.cell.cmp(&b.cell)));
        all.truncate(n);
        all
    }
}
