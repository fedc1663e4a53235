#![forbid(unsafe_code)]

//! Row-major ordering of layout items.
//!
//! Rows ascend first, then columns. Items sharing the same `(x, y)` keep
//! their relative layout order (the sort is stable).

use dgrid_core::GridItem;

/// Items sorted top-to-bottom, then left-to-right.
#[must_use]
pub fn sort_layout_items_by_row_col(layout: &[GridItem]) -> Vec<&GridItem> {
    row_col_order(layout)
        .into_iter()
        .map(|idx| &layout[idx])
        .collect()
}

/// Layout indices in row-major order.
#[must_use]
pub fn row_col_order(layout: &[GridItem]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).collect();
    order.sort_by_key(|&idx| (layout[idx].y, layout[idx].x));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(items: &[&'a GridItem]) -> Vec<&'a str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn rows_before_columns() {
        let layout = vec![
            GridItem::new("c", 0, 2, 1, 1),
            GridItem::new("b", 3, 0, 1, 1),
            GridItem::new("a", 1, 0, 1, 1),
            GridItem::new("d", 0, 1, 1, 1),
        ];
        assert_eq!(ids(&sort_layout_items_by_row_col(&layout)), ["a", "b", "d", "c"]);
    }

    #[test]
    fn equal_positions_keep_layout_order() {
        let layout = vec![
            GridItem::new("late", 2, 2, 1, 1),
            GridItem::new("first", 0, 0, 1, 1),
            GridItem::new("second", 0, 0, 4, 4),
        ];
        assert_eq!(row_col_order(&layout), vec![1, 2, 0]);
    }

    #[test]
    fn empty_layout_sorts_to_empty() {
        assert!(sort_layout_items_by_row_col(&[]).is_empty());
    }
}
