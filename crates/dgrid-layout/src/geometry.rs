#![forbid(unsafe_code)]

//! Layout-wide extents.

use dgrid_core::GridItem;

/// Lowest occupied row edge: the maximum `y + h` over all items.
///
/// Returns 0 for an empty layout. Hosts use it to size the row count of the
/// containing grid.
#[must_use]
pub fn bottom(layout: &[GridItem]) -> u32 {
    layout.iter().map(GridItem::bottom).max().unwrap_or(0)
}

/// Rightmost occupied column edge: the maximum `x + w` over all items.
#[must_use]
pub fn right(layout: &[GridItem]) -> u32 {
    layout
        .iter()
        .map(|item| item.rect().right())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_of_empty_layout_is_zero() {
        assert_eq!(bottom(&[]), 0);
        assert_eq!(right(&[]), 0);
    }

    #[test]
    fn bottom_takes_tallest_edge() {
        let layout = vec![GridItem::new("a", 0, 0, 1, 2), GridItem::new("b", 1, 3, 1, 1)];
        assert_eq!(bottom(&layout), 4);
        assert_eq!(right(&layout), 2);
    }

    #[test]
    fn statics_count_toward_bottom() {
        let layout = vec![GridItem::new("a", 0, 0, 1, 1), GridItem::fixed("s", 0, 5, 1, 3)];
        assert_eq!(bottom(&layout), 8);
    }
}
