#![forbid(unsafe_code)]

//! Pairwise collision detection.
//!
//! Two items collide when their cell rectangles share at least one cell and
//! they are not the same item. Identity is the [`ItemId`](dgrid_core::ItemId):
//! an item never collides with itself, even when another record carries
//! identical coordinates.
//!
//! The index-based helpers at the bottom are what the resolver and the
//! engine use internally; there identity is the slot in the layout.

use dgrid_core::{CellRect, GridItem};

/// Check whether two distinct items overlap.
#[inline]
#[must_use]
pub fn collides(a: &GridItem, b: &GridItem) -> bool {
    a.id != b.id && a.rect().overlaps(&b.rect())
}

/// All static items, in layout order.
#[must_use]
pub fn get_statics(layout: &[GridItem]) -> Vec<&GridItem> {
    layout.iter().filter(|item| item.is_static).collect()
}

/// Every item in `layout` that collides with `item`, in layout order.
#[must_use]
pub fn get_all_collisions<'a>(layout: &'a [GridItem], item: &GridItem) -> Vec<&'a GridItem> {
    layout.iter().filter(|other| collides(other, item)).collect()
}

/// The first item in `layout` order that collides with `item`.
#[must_use]
pub fn get_first_collision<'a>(layout: &'a [GridItem], item: &GridItem) -> Option<&'a GridItem> {
    layout.iter().find(|other| collides(other, item))
}

/// The first item overlapping a bare rectangle.
///
/// A rectangle has no identity, so every overlapping item counts, including
/// the item the rectangle was derived from.
#[must_use]
pub fn first_collision_with_rect(layout: &[GridItem], rect: CellRect) -> Option<&GridItem> {
    layout.iter().find(|other| other.rect().overlaps(&rect))
}

#[inline]
pub(crate) fn collides_at(layout: &[GridItem], a: usize, b: usize) -> bool {
    a != b && layout[a].rect().overlaps(&layout[b].rect())
}

/// Indices from `order` whose items collide with `layout[target]`, preserving `order`.
pub(crate) fn collisions_in(layout: &[GridItem], order: &[usize], target: usize) -> Vec<usize> {
    order
        .iter()
        .copied()
        .filter(|&idx| collides_at(layout, idx, target))
        .collect()
}
