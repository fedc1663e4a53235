#![forbid(unsafe_code)]

//! Move resolution with cascading displacement.
//!
//! Moving an item can land it on top of others. Each item it now overlaps
//! is pushed out of the way, and that push can in turn land on further
//! items, so one move may cascade through a large part of the layout.
//!
//! # Algorithm
//!
//! A placement writes the new coordinates, marks the item as moved for the
//! rest of the call, and lists everything it overlaps in row-major order
//! (bottom-to-top instead when the item moved up). The list is then walked:
//!
//! 1. Items already moved during this call are skipped.
//! 2. When the mover sits lower than a hit by more than a quarter of the
//!    hit's height, the hit is left alone. Dragging past a neighbour does
//!    not swap with it until the pointer has clearly committed.
//! 3. Otherwise the hit is displaced away from the mover, or the mover is
//!    displaced away from the hit when the hit is static.
//!
//! Displacement is itself a placement, so it opens its own list. Pending
//! lists are kept on an explicit stack and walked depth-first: a nested
//! list is finished before its parent resumes, exactly as mutual recursion
//! between "move" and "move away" would order things, without the
//! recursion.
//!
//! A user-driven displacement first tries the slot directly above the item
//! it is moving away from and takes it when nothing occupies it. Every other
//! displacement nudges the item down by one row and lets the next list deal
//! with whatever it now overlaps.
//!
//! # Invariants
//!
//! 1. Static items never change.
//! 2. An item other than the mover is displaced at most once per call. In a
//!    layout without static items a call over `n` items therefore performs
//!    at most `n - 1` displacements; static items can push the mover down
//!    more than once.
//! 3. A move rejected by `prevent_collision` leaves the layout untouched.
//!
//! The moved set lives for exactly one call. Nothing is stored on the items.

use dgrid_core::{GridItem, ItemId, debug, debug_span, trace};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::change::{LayoutChange, RectSnapshot};
use crate::collision::{collisions_in, first_collision_with_rect};
use crate::error::{LayoutError, Result};
use crate::order::row_col_order;

/// Where to move an item and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// New column, or `None` to keep the current one.
    pub x: Option<u32>,
    /// New row.
    pub y: u32,
    /// The move comes from a user gesture. Enables the optimistic
    /// "jump above" displacement for items pushed by this move.
    pub user_action: bool,
    /// Reject the whole move instead of displacing anything.
    pub prevent_collision: bool,
}

impl MoveRequest {
    /// A user-driven move to `(x, y)`.
    #[must_use]
    pub const fn to(x: u32, y: u32) -> Self {
        Self {
            x: Some(x),
            y,
            user_action: true,
            prevent_collision: false,
        }
    }

    /// A user-driven move to row `y`, keeping the column.
    #[must_use]
    pub const fn to_row(y: u32) -> Self {
        Self {
            x: None,
            y,
            user_action: true,
            prevent_collision: false,
        }
    }

    /// Mark the move as not coming from a user gesture.
    #[must_use]
    pub const fn programmatic(mut self) -> Self {
        self.user_action = false;
        self
    }

    /// Set collision prevention.
    #[must_use]
    pub const fn prevent_collision(mut self, prevent: bool) -> Self {
        self.prevent_collision = prevent;
        self
    }
}

/// How a move call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    /// The item was placed and collisions were resolved.
    Applied,
    /// `prevent_collision` was set and the target was occupied. Nothing changed.
    Rejected,
    /// The item is static. Nothing changed.
    StaticItem,
}

/// How a displaced item picked its new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaceKind {
    /// Jumped to the free slot directly above the anchor.
    Optimistic,
    /// Pushed down one row.
    Nudge,
}

/// One displacement performed during a cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// The item moved out of the way.
    pub displaced: ItemId,
    /// The item it was moved away from.
    pub anchor: ItemId,
    /// Row before the displacement.
    pub from_y: u32,
    /// Row after the displacement.
    pub to_y: u32,
    /// Which placement rule chose `to_y`.
    pub kind: DisplaceKind,
}

/// Result of a move call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub status: MoveStatus,
    /// Items whose rectangle changed, in layout order. Includes the moved item.
    pub changes: Vec<LayoutChange>,
    /// Every displacement in the order it happened.
    pub steps: Vec<CascadeStep>,
}

impl MoveOutcome {
    fn unchanged(status: MoveStatus) -> Self {
        Self {
            status,
            changes: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Number of displacements the call performed.
    #[must_use]
    pub fn resolutions(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.status == MoveStatus::Applied
    }
}

/// Move the item with `id` and resolve every collision the move causes.
///
/// Static items are left alone ([`MoveStatus::StaticItem`]). With
/// `prevent_collision` set, a target that overlaps anything rolls the move
/// back ([`MoveStatus::Rejected`]).
pub fn move_element(layout: &mut [GridItem], id: &str, request: MoveRequest) -> Result<MoveOutcome> {
    let idx = index_of(layout, id)?;
    Ok(move_element_at(layout, idx, request))
}

/// Push `item_id` out of the way of `collision_id`.
///
/// With `is_user_action`, the item first tries the slot directly above the
/// other item and takes it if nothing is there; otherwise it moves down one
/// row. The move then cascades like any programmatic move.
pub fn move_element_away_from_collision(
    layout: &mut [GridItem],
    collision_id: &str,
    item_id: &str,
    is_user_action: bool,
) -> Result<MoveOutcome> {
    let anchor = index_of(layout, collision_id)?;
    let displaced = index_of(layout, item_id)?;
    if layout[displaced].is_static {
        return Ok(MoveOutcome::unchanged(MoveStatus::StaticItem));
    }

    let before = RectSnapshot::capture(layout);
    let mut cascade = Cascade::new(layout);
    let frame = cascade.displace(anchor, displaced, is_user_action);
    cascade.run(frame);
    let steps = cascade.steps;

    Ok(MoveOutcome {
        status: MoveStatus::Applied,
        changes: before.diff(layout),
        steps,
    })
}

pub(crate) fn index_of(layout: &[GridItem], id: &str) -> Result<usize> {
    layout
        .iter()
        .position(|item| item.id.as_str() == id)
        .ok_or_else(|| LayoutError::unknown(id))
}

pub(crate) fn move_element_at(
    layout: &mut [GridItem],
    idx: usize,
    request: MoveRequest,
) -> MoveOutcome {
    let span = debug_span!(
        "move_element",
        item = %layout[idx].id,
        x = ?request.x,
        y = request.y,
        user_action = request.user_action
    );
    let _guard = span.enter();

    if layout[idx].is_static {
        debug!(item = %layout[idx].id, "static item ignores move");
        return MoveOutcome::unchanged(MoveStatus::StaticItem);
    }

    let before = RectSnapshot::capture(layout);
    let mut cascade = Cascade::new(layout);
    let root = cascade.place(idx, request.x, request.y, request.user_action);

    if request.prevent_collision && !root.hits.is_empty() {
        debug!(
            item = %cascade.layout[idx].id,
            collisions = root.hits.len(),
            "move rejected: target occupied"
        );
        before.restore(cascade.layout);
        return MoveOutcome::unchanged(MoveStatus::Rejected);
    }

    cascade.run(root);
    let steps = cascade.steps;
    debug!(resolutions = steps.len(), "move resolved");

    MoveOutcome {
        status: MoveStatus::Applied,
        changes: before.diff(layout),
        steps,
    }
}

/// A placed item and the hits still to resolve for it.
#[derive(Debug)]
struct Frame {
    mover: usize,
    hits: Vec<usize>,
    next: usize,
    user_action: bool,
}

/// State for one move call.
struct Cascade<'a> {
    layout: &'a mut [GridItem],
    moved: FxHashSet<usize>,
    steps: Vec<CascadeStep>,
}

impl<'a> Cascade<'a> {
    fn new(layout: &'a mut [GridItem]) -> Self {
        Self {
            layout,
            moved: FxHashSet::default(),
            steps: Vec::new(),
        }
    }

    /// Write new coordinates for `mover` and list what it now overlaps.
    fn place(&mut self, mover: usize, x: Option<u32>, y: u32, user_action: bool) -> Frame {
        let moving_up = self.layout[mover].y > y;
        if let Some(x) = x {
            self.layout[mover].x = x;
        }
        self.layout[mover].y = y;
        self.moved.insert(mover);

        let mut order = row_col_order(self.layout);
        if moving_up {
            order.reverse();
        }
        let hits = collisions_in(self.layout, &order, mover);

        Frame {
            mover,
            hits,
            next: 0,
            user_action,
        }
    }

    /// Walk frames depth-first until every pending hit is handled.
    fn run(&mut self, root: Frame) {
        let mut stack = vec![root];
        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.hits.len() {
                stack.pop();
                continue;
            }
            let hit = frame.hits[frame.next];
            frame.next += 1;
            let mover = frame.mover;
            let user_action = frame.user_action;

            if self.moved.contains(&hit) {
                continue;
            }
            if self.already_cleared(mover, hit) {
                continue;
            }

            let next = if self.layout[hit].is_static {
                self.displace(hit, mover, user_action)
            } else {
                self.displace(mover, hit, user_action)
            };
            stack.push(next);
        }
    }

    /// The mover has descended past `hit` by more than a quarter of its height.
    fn already_cleared(&self, mover: usize, hit: usize) -> bool {
        let mover_y = u64::from(self.layout[mover].y);
        let hit = &self.layout[hit];
        let hit_y = u64::from(hit.y);
        mover_y > hit_y && 4 * (mover_y - hit_y) > u64::from(hit.h)
    }

    /// Move `displaced` away from `anchor` and open a frame for its new spot.
    fn displace(&mut self, anchor: usize, displaced: usize, user_action: bool) -> Frame {
        let from_y = self.layout[displaced].y;
        let (to_y, kind) = self.displacement_target(anchor, displaced, user_action);

        trace!(
            displaced = %self.layout[displaced].id,
            anchor = %self.layout[anchor].id,
            from_y,
            to_y,
            kind = ?kind,
            "displace"
        );
        self.steps.push(CascadeStep {
            displaced: self.layout[displaced].id.clone(),
            anchor: self.layout[anchor].id.clone(),
            from_y,
            to_y,
            kind,
        });

        self.place(displaced, None, to_y, false)
    }

    fn displacement_target(
        &self,
        anchor: usize,
        displaced: usize,
        user_action: bool,
    ) -> (u32, DisplaceKind) {
        let item = &self.layout[displaced];
        if user_action {
            let above = self.layout[anchor].y.saturating_sub(item.h);
            let probe = item.rect().at(item.x, above);
            if first_collision_with_rect(self.layout, probe).is_none() {
                return (above, DisplaceKind::Optimistic);
            }
        }
        (item.y.saturating_add(1), DisplaceKind::Nudge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ys(layout: &[GridItem]) -> Vec<u32> {
        layout.iter().map(|item| item.y).collect()
    }

    #[test]
    fn user_swap_lifts_displaced_item_above() {
        let mut layout = vec![GridItem::new("A", 0, 0, 1, 1), GridItem::new("B", 0, 1, 1, 1)];
        let outcome = move_element(&mut layout, "A", MoveRequest::to_row(1)).unwrap();

        assert_eq!(outcome.status, MoveStatus::Applied);
        assert_eq!(ys(&layout), vec![1, 0]);
        assert_eq!(outcome.resolutions(), 1);
        assert_eq!(outcome.steps[0].kind, DisplaceKind::Optimistic);
        assert_eq!(outcome.changes.len(), 2);
    }

    #[test]
    fn programmatic_move_pushes_down() {
        let mut layout = vec![GridItem::new("A", 0, 0, 1, 1), GridItem::new("B", 0, 1, 1, 1)];
        move_element(&mut layout, "A", MoveRequest::to_row(1).programmatic()).unwrap();
        assert_eq!(ys(&layout), vec![1, 2]);
    }

    #[test]
    fn static_item_does_not_move() {
        let mut layout = vec![GridItem::fixed("S", 0, 0, 2, 2), GridItem::new("M", 2, 0, 1, 1)];
        let outcome = move_element(&mut layout, "S", MoveRequest::to(3, 3)).unwrap();
        assert_eq!(outcome.status, MoveStatus::StaticItem);
        assert_eq!(layout[0], GridItem::fixed("S", 0, 0, 2, 2));
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn mover_is_nudged_off_a_static_item() {
        let mut layout = vec![GridItem::fixed("S", 0, 0, 2, 2), GridItem::new("M", 2, 0, 2, 2)];
        let outcome = move_element(&mut layout, "M", MoveRequest::to(0, 0)).unwrap();

        // The slot above S is off the grid, so M nudges down one row. At row 1
        // it has passed S's top by more than a quarter of S, so the cascade
        // stops there; compaction settles the rest.
        assert_eq!(layout[0], GridItem::fixed("S", 0, 0, 2, 2));
        assert_eq!((layout[1].x, layout[1].y), (0, 1));
        assert_eq!(outcome.resolutions(), 1);
        assert_eq!(outcome.steps[0].displaced.as_str(), "M");
        assert_eq!(outcome.steps[0].anchor.as_str(), "S");
    }

    #[test]
    fn prevent_collision_rolls_back() {
        let mut layout = vec![GridItem::new("A", 0, 0, 1, 1), GridItem::new("B", 1, 0, 1, 1)];
        let outcome =
            move_element(&mut layout, "A", MoveRequest::to(1, 0).prevent_collision(true)).unwrap();
        assert_eq!(outcome.status, MoveStatus::Rejected);
        assert_eq!(layout[0], GridItem::new("A", 0, 0, 1, 1));
        assert_eq!(layout[1], GridItem::new("B", 1, 0, 1, 1));
    }

    #[test]
    fn prevent_collision_allows_free_target() {
        let mut layout = vec![GridItem::new("A", 0, 0, 1, 1), GridItem::new("B", 1, 0, 1, 1)];
        let outcome =
            move_element(&mut layout, "A", MoveRequest::to(0, 3).prevent_collision(true)).unwrap();
        assert!(outcome.is_applied());
        assert_eq!(layout[0].y, 3);
    }

    #[test]
    fn quarter_height_tolerance_skips_neighbour() {
        // B spans rows 0..4; A lands at row 2, two rows past B's top (> 4/4).
        let mut layout = vec![GridItem::new("A", 1, 0, 1, 1), GridItem::new("B", 0, 0, 2, 4)];
        let outcome = move_element(&mut layout, "A", MoveRequest::to(0, 2)).unwrap();
        assert_eq!(outcome.resolutions(), 0);
        assert_eq!(layout[1].y, 0);
    }

    #[test]
    fn tolerance_boundary_is_strict() {
        // One row past a four-row neighbour is exactly a quarter: not skipped.
        let mut layout = vec![GridItem::new("A", 1, 5, 1, 1), GridItem::new("B", 0, 0, 2, 4)];
        let outcome = move_element(&mut layout, "A", MoveRequest::to(0, 1).programmatic()).unwrap();
        assert_eq!(outcome.resolutions(), 1);
        assert_eq!(outcome.steps[0].displaced.as_str(), "B");
    }

    #[test]
    fn chain_displaces_each_item_once() {
        let mut layout: Vec<GridItem> =
            (0..6).map(|i| GridItem::new(format!("n{i}"), 0, i, 1, 1)).collect();
        let outcome = move_element(&mut layout, "n0", MoveRequest::to_row(1).programmatic()).unwrap();

        assert_eq!(outcome.resolutions(), 5);
        assert_eq!(ys(&layout), vec![1, 2, 3, 4, 5, 6]);
        assert!(outcome.steps.iter().all(|s| s.kind == DisplaceKind::Nudge));
    }

    #[test]
    fn optimistic_slot_blocked_by_displaced_item_itself() {
        // The four rows above A's new top still overlap B's own cells.
        let mut layout = vec![GridItem::new("A", 0, 0, 1, 1), GridItem::new("B", 0, 3, 1, 4)];
        let outcome = move_element(&mut layout, "A", MoveRequest::to_row(4)).unwrap();
        assert_eq!(outcome.steps[0].kind, DisplaceKind::Nudge);
        assert_eq!(layout[1].y, 4);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut layout = vec![GridItem::new("A", 0, 0, 1, 1)];
        let err = move_element(&mut layout, "Z", MoveRequest::to_row(0)).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownItem { ref id } if id == "Z"));
    }

    #[test]
    fn empty_layout_reports_unknown() {
        let mut layout: Vec<GridItem> = Vec::new();
        assert!(move_element(&mut layout, "A", MoveRequest::to_row(0)).is_err());
    }

    #[test]
    fn move_away_uses_optimistic_slot_for_users() {
        let mut layout = vec![GridItem::new("A", 0, 2, 1, 1), GridItem::new("B", 0, 2, 1, 1)];
        let outcome = move_element_away_from_collision(&mut layout, "A", "B", true).unwrap();
        assert_eq!(layout[1].y, 1);
        assert_eq!(outcome.steps[0].kind, DisplaceKind::Optimistic);
        assert_eq!(layout[0].y, 2);
    }

    #[test]
    fn move_away_nudges_otherwise() {
        let mut layout = vec![GridItem::new("A", 0, 2, 1, 1), GridItem::new("B", 0, 2, 1, 1)];
        move_element_away_from_collision(&mut layout, "A", "B", false).unwrap();
        // B nudges to row 3, which is free.
        assert_eq!(layout[1].y, 3);
    }

    #[test]
    fn move_away_leaves_static_items() {
        let mut layout = vec![GridItem::new("A", 0, 0, 1, 1), GridItem::fixed("S", 0, 0, 1, 1)];
        let outcome = move_element_away_from_collision(&mut layout, "A", "S", true).unwrap();
        assert_eq!(outcome.status, MoveStatus::StaticItem);
        assert_eq!(layout[1].y, 0);
    }
}
