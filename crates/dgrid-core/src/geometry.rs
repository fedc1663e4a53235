#![forbid(unsafe_code)]

//! Grid-cell geometry.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle measured in grid cells.
///
/// Occupies the half-open ranges `[x, x + w)` by `[y, y + h)`, with the
/// origin at the top-left cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellRect {
    /// Left column (inclusive).
    pub x: u32,
    /// Top row (inclusive).
    pub y: u32,
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl CellRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Check if the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Check if a cell lies inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether two rectangles share at least one cell.
    ///
    /// Edge contact does not count: `[0, 2)` and `[2, 4)` do not overlap.
    #[inline]
    pub const fn overlaps(&self, other: &CellRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Same rectangle moved to another origin.
    #[inline]
    #[must_use]
    pub const fn at(self, x: u32, y: u32) -> Self {
        Self::new(x, y, self.w, self.h)
    }

    /// Compute the overlapping region, returning `None` if the rectangles are disjoint.
    pub fn intersection_opt(&self, other: &CellRect) -> Option<CellRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(CellRect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}
