//! Discrete grid geometry.
//!
//! Cells are addressed by signed integer coordinates so that candidate moves
//! (`pos + offset`) can step outside the grid and be clamped or rejected
//! afterwards without wrapping.  Only positions inside [`GridBounds`] are ever
//! stored on an agent.

use std::fmt;

use crate::{DmError, DmResult};

/// The 3×3 block of offsets around a cell, centre included.
///
/// Enumeration order is `dx` outer, `dy` inner, both ascending over
/// `-1, 0, 1`.  Rules that break ties by "first candidate encountered" rely on
/// this order.
pub const MOORE_BLOCK: [(i32, i32); 9] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1), ( 0, 0), ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// A grid cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell `(dx, dy)` away.  May lie outside the grid.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> GridPos {
        GridPos::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Chebyshev (king-move) distance.  Radius-1 balls are Moore neighborhoods.
    #[inline]
    pub fn chebyshev(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

/// The fixed extent of the grid: `[0, width) × [0, height)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    width:  i32,
    height: i32,
}

impl GridBounds {
    /// Validate and build bounds.  Zero-area grids cannot hold an agent and
    /// are rejected.
    pub fn new(width: u32, height: u32) -> DmResult<Self> {
        if width == 0 || height == 0 {
            return Err(DmError::Config(format!(
                "grid must have positive area, got {width}x{height}"
            )));
        }
        let width = i32::try_from(width)
            .map_err(|_| DmError::Config(format!("grid width {width} exceeds i32::MAX")))?;
        let height = i32::try_from(height)
            .map_err(|_| DmError::Config(format!("grid height {height} exceeds i32::MAX")))?;
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Number of cells.
    #[inline]
    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Clip a candidate coordinate into the grid.
    #[inline]
    pub fn clamp(&self, pos: GridPos) -> GridPos {
        GridPos::new(pos.x.clamp(0, self.width - 1), pos.y.clamp(0, self.height - 1))
    }
}
