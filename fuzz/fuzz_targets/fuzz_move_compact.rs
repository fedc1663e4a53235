#![no_main]

use arbitrary::Arbitrary;
use dgrid_layout::{GridItem, MoveRequest, MoveStatus, collides, compact, move_element};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Cell {
    x: u8,
    y: u8,
    w: u8,
    h: u8,
    is_static: bool,
}

#[derive(Debug, Arbitrary)]
struct Drag {
    target: u8,
    x: u8,
    y: u8,
    user_action: bool,
    prevent_collision: bool,
}

#[derive(Debug, Arbitrary)]
struct Input {
    cells: Vec<Cell>,
    drags: Vec<Drag>,
    vertical_compact: bool,
}

fuzz_target!(|input: Input| {
    // Keep the grid small: 1..=32 items on a 16x32 board, sizes 1..=4.
    let mut layout: Vec<GridItem> = input
        .cells
        .iter()
        .take(32)
        .enumerate()
        .map(|(i, c)| {
            GridItem::new(
                format!("i{i}"),
                u32::from(c.x % 16),
                u32::from(c.y % 32),
                u32::from(c.w % 4) + 1,
                u32::from(c.h % 4) + 1,
            )
            .with_static(c.is_static)
        })
        .collect();
    if layout.is_empty() {
        return;
    }
    let statics: Vec<GridItem> = layout.iter().filter(|i| i.is_static).cloned().collect();

    for drag in input.drags.iter().take(16) {
        let idx = usize::from(drag.target) % layout.len();
        let id = layout[idx].id.clone();
        let before = layout.clone();

        let mut request = MoveRequest::to(u32::from(drag.x % 16), u32::from(drag.y % 32))
            .prevent_collision(drag.prevent_collision);
        if !drag.user_action {
            request = request.programmatic();
        }
        let outcome = move_element(&mut layout, id.as_str(), request).expect("id exists");

        if outcome.status != MoveStatus::Applied {
            assert_eq!(layout, before, "non-applied move changed the layout");
        }
        if statics.is_empty() {
            assert!(outcome.resolutions() < layout.len(), "cascade exceeded item count");
        }

        compact(&mut layout, input.vertical_compact);

        // Post-conditions that must always hold:
        let now: Vec<GridItem> = layout.iter().filter(|i| i.is_static).cloned().collect();
        assert_eq!(now, statics, "static item moved");
        for (i, a) in layout.iter().enumerate() {
            for b in &layout[i + 1..] {
                if a.is_static && b.is_static {
                    continue;
                }
                assert!(!collides(a, b), "{a:?} overlaps {b:?}");
            }
        }
        let again = {
            let mut copy = layout.clone();
            compact(&mut copy, input.vertical_compact);
            copy
        };
        assert_eq!(again, layout, "compaction not idempotent");
    }
});
