#![forbid(unsafe_code)]

//! Change records returned by mutating operations.
//!
//! The engine does not notify anyone. Each call hands back the list of
//! items whose rectangle differs from before the call, and the host turns
//! that into whatever notifications it needs.

use dgrid_core::{CellRect, GridItem, ItemId};
use serde::{Deserialize, Serialize};

/// One item whose rectangle changed during a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutChange {
    /// The item that changed.
    pub id: ItemId,
    /// Rectangle before the call.
    pub from: CellRect,
    /// Rectangle after the call.
    pub to: CellRect,
}

impl LayoutChange {
    /// Whether the item ended up in a different row or column.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.from.x != self.to.x || self.from.y != self.to.y
    }

    /// Whether the item ended up with a different size.
    #[must_use]
    pub fn resized(&self) -> bool {
        self.from.w != self.to.w || self.from.h != self.to.h
    }
}

/// Rectangles of every item, captured before a mutation.
#[derive(Debug, Clone)]
pub(crate) struct RectSnapshot(Vec<CellRect>);

impl RectSnapshot {
    pub(crate) fn capture(layout: &[GridItem]) -> Self {
        Self(layout.iter().map(GridItem::rect).collect())
    }

    /// Changes between the snapshot and `layout`, in layout index order.
    pub(crate) fn diff(&self, layout: &[GridItem]) -> Vec<LayoutChange> {
        layout
            .iter()
            .zip(&self.0)
            .filter(|(item, before)| item.rect() != **before)
            .map(|(item, before)| LayoutChange {
                id: item.id.clone(),
                from: *before,
                to: item.rect(),
            })
            .collect()
    }

    /// Put every item back where the snapshot found it.
    pub(crate) fn restore(&self, layout: &mut [GridItem]) {
        for (item, before) in layout.iter_mut().zip(&self.0) {
            item.x = before.x;
            item.y = before.y;
            item.w = before.w;
            item.h = before.h;
        }
    }
}
