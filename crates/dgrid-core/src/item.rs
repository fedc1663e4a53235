#![forbid(unsafe_code)]

//! Grid item records.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::CellRect;

/// Stable identifier for a grid item.
///
/// Assigned by the caller and never rewritten by the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap a caller-provided identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// One rectangular item placed on the grid.
///
/// Static items are obstacles: the engine never changes their position or
/// size. Everything else may have `x` and `y` rewritten by move resolution
/// and compaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    /// Stable identifier. Serialized as `i`.
    #[serde(rename = "i", alias = "id")]
    pub id: ItemId,
    /// Column of the left edge.
    pub x: u32,
    /// Row of the top edge.
    pub y: u32,
    /// Width in columns (at least 1).
    pub w: u32,
    /// Height in rows (at least 1).
    pub h: u32,
    /// Pinned in place; participates only as an obstacle.
    #[serde(rename = "static", default)]
    pub is_static: bool,
}

impl GridItem {
    /// Create a movable item.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            is_static: false,
        }
    }

    /// Create a static (immovable) item.
    #[must_use]
    pub fn fixed(id: impl Into<ItemId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            is_static: true,
            ..Self::new(id, x, y, w, h)
        }
    }

    /// Set whether the item is static.
    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// The cells this item covers.
    #[inline]
    #[must_use]
    pub const fn rect(&self) -> CellRect {
        CellRect::new(self.x, self.y, self.w, self.h)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }
}
