//! End-to-end drag scenarios: move, cascade, then compact.

use dgrid_layout::{
    DisplaceKind, EngineConfig, GridItem, LayoutEngine, MoveRequest, MoveStatus, bottom, collides,
    compact, move_element, render_ascii,
};

fn ys(layout: &[GridItem]) -> Vec<u32> {
    layout.iter().map(|item| item.y).collect()
}

#[test]
fn direct_swap_under_user_drag() {
    let mut layout = vec![GridItem::new("A", 0, 0, 1, 1), GridItem::new("B", 0, 1, 1, 1)];
    let outcome = move_element(&mut layout, "A", MoveRequest::to_row(1)).unwrap();

    assert_eq!(outcome.status, MoveStatus::Applied);
    assert_eq!(ys(&layout), vec![1, 0]);

    compact(&mut layout, true);
    assert_eq!(ys(&layout), vec![1, 0]);
}

#[test]
fn direct_push_without_user_drag() {
    let mut layout = vec![GridItem::new("A", 0, 0, 1, 1), GridItem::new("B", 0, 1, 1, 1)];
    move_element(&mut layout, "A", MoveRequest::to_row(1).programmatic()).unwrap();

    // B is pushed below A's new position.
    assert_eq!(ys(&layout), vec![1, 2]);
    assert_eq!(layout[1].y, layout[0].bottom());
}

#[test]
fn static_obstacle_pushes_the_mover() {
    let mut layout = vec![
        GridItem::fixed("S", 0, 0, 2, 2),
        GridItem::new("M", 2, 0, 2, 2),
    ];
    move_element(&mut layout, "M", MoveRequest::to(0, 0)).unwrap();
    compact(&mut layout, true);

    assert_eq!(layout[0], GridItem::fixed("S", 0, 0, 2, 2));
    assert!(!collides(&layout[0], &layout[1]));
    assert_eq!((layout[1].x, layout[1].y), (0, 2));
    assert_eq!(render_ascii(&layout), "SS\nSS\nMM\nMM\n");
}

#[test]
fn bottom_of_two_columns() {
    let layout = vec![GridItem::new("a", 0, 0, 1, 2), GridItem::new("b", 1, 3, 1, 1)];
    assert_eq!(bottom(&layout), 4);
}

#[test]
fn rollback_when_only_target_is_occupied() {
    let mut layout = vec![
        GridItem::new("A", 0, 0, 2, 2),
        GridItem::new("B", 2, 0, 2, 2),
        GridItem::fixed("S", 0, 2, 4, 1),
    ];
    let before = layout.clone();
    let outcome = move_element(
        &mut layout,
        "A",
        MoveRequest::to(1, 0).prevent_collision(true),
    )
    .unwrap();

    assert_eq!(outcome.status, MoveStatus::Rejected);
    assert_eq!(layout, before);
}

#[test]
fn static_move_is_a_no_op() {
    let mut layout = vec![GridItem::fixed("S", 3, 3, 1, 1), GridItem::new("M", 0, 0, 1, 1)];
    let outcome = move_element(&mut layout, "S", MoveRequest::to(0, 0)).unwrap();
    assert_eq!(outcome.status, MoveStatus::StaticItem);
    assert_eq!((layout[0].x, layout[0].y), (3, 3));
}

#[test]
fn chain_of_items_terminates_within_bound() {
    for n in [2u32, 10, 60] {
        let mut layout: Vec<GridItem> =
            (0..n).map(|i| GridItem::new(format!("n{i}"), 0, i, 1, 1)).collect();
        let outcome =
            move_element(&mut layout, "n0", MoveRequest::to_row(1).programmatic()).unwrap();
        assert!(outcome.resolutions() <= n as usize);
        assert_eq!(outcome.resolutions(), n as usize - 1);
        assert_eq!(layout.last().unwrap().y, n);
    }
}

#[test]
fn chain_under_user_drag_swaps_once() {
    let mut layout: Vec<GridItem> =
        (0..8).map(|i| GridItem::new(format!("n{i}"), 0, i, 1, 1)).collect();
    let outcome = move_element(&mut layout, "n0", MoveRequest::to_row(1)).unwrap();

    assert_eq!(outcome.resolutions(), 1);
    assert_eq!(outcome.steps[0].kind, DisplaceKind::Optimistic);
    assert_eq!(ys(&layout), vec![1, 0, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn moving_up_resolves_lower_neighbours_first() {
    let mut layout = vec![
        GridItem::new("A", 0, 3, 1, 2),
        GridItem::new("B", 0, 0, 1, 1),
        GridItem::new("C", 0, 1, 1, 1),
    ];
    let outcome = move_element(&mut layout, "A", MoveRequest::to_row(0)).unwrap();

    let order: Vec<&str> = outcome.steps.iter().map(|s| s.displaced.as_str()).collect();
    assert_eq!(order, ["C", "B"]);

    compact(&mut layout, true);
    assert_eq!(ys(&layout), vec![0, 2, 3]);
}

#[test]
fn drag_session_through_engine() {
    let items = vec![
        GridItem::fixed("hdr", 0, 0, 4, 1),
        GridItem::new("a", 0, 1, 2, 2),
        GridItem::new("b", 2, 1, 2, 2),
        GridItem::new("c", 0, 3, 4, 1),
    ];
    let mut engine = LayoutEngine::new(items, EngineConfig::default().cols(4)).unwrap();

    // Drag c up over a and b, one row at a time.
    engine.move_item("c", 0, 2).unwrap();
    engine.move_item("c", 0, 1).unwrap();

    let items = engine.items();
    assert_eq!(items[0], GridItem::fixed("hdr", 0, 0, 4, 1));
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            assert!(!collides(a, b), "{} overlaps {}", a.id, b.id);
        }
    }
    assert_eq!(engine.item("c").unwrap().y, 1);
    assert_eq!(engine.bottom(), 4);
}
