#![forbid(unsafe_code)]

//! Compaction: re-pack movable items against static obstacles.
//!
//! Items are visited in row-major order. Each movable item is optionally
//! pulled up while the row above is free, then dropped below whatever it
//! still overlaps, and becomes an obstacle for the items visited after it.
//! Static items are obstacles from the start and never move.
//!
//! The layout is rewritten in place; item order in the slice is never
//! changed, so callers that map by index keep their mapping.

use dgrid_core::{CellRect, GridItem, debug, debug_span};

use crate::change::{LayoutChange, RectSnapshot};
use crate::order::row_col_order;

/// Compact the whole layout.
///
/// With `vertical_compact`, every movable item rises until it touches an
/// obstacle or row 0. Without it, items only move down, and only far enough
/// to stop overlapping an obstacle.
pub fn compact(layout: &mut [GridItem], vertical_compact: bool) -> Vec<LayoutChange> {
    let span = debug_span!("compact", items = layout.len(), vertical_compact);
    let _guard = span.enter();

    let before = RectSnapshot::capture(layout);
    let mut obstacles: Vec<usize> = (0..layout.len())
        .filter(|&idx| layout[idx].is_static)
        .collect();

    for idx in row_col_order(layout) {
        if layout[idx].is_static {
            continue;
        }
        let placed = {
            let view: &[GridItem] = layout;
            settle(view[idx].rect(), vertical_compact, |probe| {
                obstacles
                    .iter()
                    .map(|&other| &view[other])
                    .find(|other| other.rect().overlaps(&probe))
                    .map(GridItem::bottom)
            })
        };
        layout[idx].y = placed;
        obstacles.push(idx);
    }

    let changes = before.diff(layout);
    debug!(changed = changes.len(), "compacted");
    changes
}

/// Settle one item against a set of obstacles.
///
/// `compare_with` should not contain `item`; a record with the same id is
/// ignored anyway.
pub fn compact_item(compare_with: &[GridItem], item: &mut GridItem, vertical_compact: bool) {
    let id = &item.id;
    let placed = settle(item.rect(), vertical_compact, |probe| {
        compare_with
            .iter()
            .filter(|other| other.id != *id)
            .find(|other| other.rect().overlaps(&probe))
            .map(GridItem::bottom)
    });
    item.y = placed;
}

/// Final row for `rect`. `first_hit` returns the bottom edge of the first
/// obstacle overlapping a probe rectangle.
fn settle(
    rect: CellRect,
    vertical_compact: bool,
    first_hit: impl Fn(CellRect) -> Option<u32>,
) -> u32 {
    let mut y = rect.y;
    if vertical_compact {
        while y > 0 && first_hit(rect.at(rect.x, y)).is_none() {
            y -= 1;
        }
    }
    // Each hit's bottom lies below the current top, so y strictly grows.
    while let Some(hit_bottom) = first_hit(rect.at(rect.x, y)) {
        y = hit_bottom;
    }
    y
}
