#![forbid(unsafe_code)]

//! Orchestrating engine: owns a layout and applies configured operations.
//!
//! [`LayoutEngine`] is what a host drives from its pointer handlers. Each
//! pointer-move during a drag becomes one [`LayoutEngine::move_item`] call,
//! which resolves collisions and then compacts, and hands back the events a
//! host would broadcast to re-render.
//!
//! # Usage
//!
//! ```
//! use dgrid_core::GridItem;
//! use dgrid_layout::{EngineConfig, LayoutEngine};
//!
//! let items = vec![GridItem::new("a", 0, 0, 1, 1), GridItem::new("b", 0, 1, 1, 1)];
//! let mut engine = LayoutEngine::new(items, EngineConfig::default()).unwrap();
//!
//! let update = engine.move_item("a", 0, 1).unwrap();
//! assert!(!update.net_changes().is_empty());
//! assert_eq!(engine.item("a").unwrap().y, 1);
//! assert_eq!(engine.item("b").unwrap().y, 0);
//! ```

use std::sync::Arc;
use std::time::Instant;

use dgrid_core::{GridItem, ItemId, debug};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::change::{LayoutChange, RectSnapshot};
use crate::collision::collides_at;
use crate::compact::compact;
use crate::config::EngineConfig;
use crate::debug::{CascadeRecord, LayoutDebugger};
use crate::error::{LayoutError, Result};
use crate::geometry::bottom;
use crate::resolver::{MoveRequest, MoveStatus, move_element_at};

/// Something that happened to the layout during one engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LayoutEvent {
    /// An item was moved (or the move was refused).
    Moved {
        id: ItemId,
        status: MoveStatus,
        changes: Vec<LayoutChange>,
    },
    /// An item was resized (or the resize was refused).
    Resized {
        id: ItemId,
        status: MoveStatus,
        changes: Vec<LayoutChange>,
    },
    /// A compaction pass ran.
    Compacted { changes: Vec<LayoutChange> },
}

impl LayoutEvent {
    /// Changes carried by this event.
    #[must_use]
    pub fn changes(&self) -> &[LayoutChange] {
        match self {
            Self::Moved { changes, .. }
            | Self::Resized { changes, .. }
            | Self::Compacted { changes } => changes,
        }
    }
}

/// Events produced by one engine call, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutUpdate {
    pub events: Vec<LayoutEvent>,
}

impl LayoutUpdate {
    /// Status of the move or resize that started the call, if any.
    #[must_use]
    pub fn status(&self) -> Option<MoveStatus> {
        self.events.iter().find_map(|event| match event {
            LayoutEvent::Moved { status, .. } | LayoutEvent::Resized { status, .. } => {
                Some(*status)
            }
            LayoutEvent::Compacted { .. } => None,
        })
    }

    /// One change per item, from its rectangle before the call to its
    /// rectangle after it. Items that ended where they started are dropped.
    #[must_use]
    pub fn net_changes(&self) -> Vec<LayoutChange> {
        let mut merged: Vec<LayoutChange> = Vec::new();
        for change in self.events.iter().flat_map(LayoutEvent::changes) {
            match merged.iter_mut().find(|m| m.id == change.id) {
                Some(existing) => existing.to = change.to,
                None => merged.push(change.clone()),
            }
        }
        merged.retain(|change| change.from != change.to);
        merged
    }
}

/// Check a layout for duplicate ids and empty items.
pub fn validate_layout(layout: &[GridItem]) -> Result<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for item in layout {
        if !seen.insert(item.id.as_str()) {
            return Err(LayoutError::DuplicateId {
                id: item.id.clone(),
            });
        }
        if item.w == 0 || item.h == 0 {
            return Err(LayoutError::ZeroSize {
                id: item.id.clone(),
            });
        }
    }
    Ok(())
}

/// A layout plus the configuration it is edited under.
#[derive(Debug)]
pub struct LayoutEngine {
    items: Vec<GridItem>,
    index: FxHashMap<ItemId, usize>,
    config: EngineConfig,
    debugger: Option<Arc<LayoutDebugger>>,
}

impl LayoutEngine {
    /// Take ownership of a layout after validating it against `config`.
    pub fn new(items: Vec<GridItem>, config: EngineConfig) -> Result<Self> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(LayoutError::InvalidConfig { problems });
        }
        validate_layout(&items)?;
        if let Some(cols) = config.cols {
            if let Some(wide) = items.iter().find(|item| item.rect().right() > cols) {
                return Err(LayoutError::OutOfBounds {
                    id: wide.id.clone(),
                    cols,
                });
            }
        }

        let index = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();

        Ok(Self {
            items,
            index,
            config,
            debugger: None,
        })
    }

    /// Attach a debugger that records every move.
    #[must_use]
    pub fn with_debugger(mut self, debugger: Arc<LayoutDebugger>) -> Self {
        self.debugger = Some(debugger);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The items, in the order they were supplied.
    #[must_use]
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&GridItem> {
        self.index.get(id).map(|&idx| &self.items[idx])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Row count needed to show every item.
    #[must_use]
    pub fn bottom(&self) -> u32 {
        bottom(&self.items)
    }

    /// Give the layout back to the caller.
    #[must_use]
    pub fn into_items(self) -> Vec<GridItem> {
        self.items
    }

    /// Move an item as a user gesture would, then compact if configured.
    ///
    /// With a column bound, `x` is clamped so the item stays on the grid.
    pub fn move_item(&mut self, id: &str, x: u32, y: u32) -> Result<LayoutUpdate> {
        let idx = self.lookup(id)?;
        let x = match self.config.cols {
            Some(cols) => x.min(cols.saturating_sub(self.items[idx].w)),
            None => x,
        };
        let request = MoveRequest::to(x, y).prevent_collision(self.config.prevent_collision);

        let started = Instant::now();
        let outcome = move_element_at(&mut self.items, idx, request);
        if let Some(debugger) = &self.debugger {
            debugger.record(CascadeRecord {
                item: self.items[idx].id.clone(),
                target_x: request.x,
                target_y: request.y,
                status: outcome.status,
                steps: outcome.steps.clone(),
                solve_time: Some(started.elapsed()),
            });
        }

        let mut update = LayoutUpdate {
            events: vec![LayoutEvent::Moved {
                id: self.items[idx].id.clone(),
                status: outcome.status,
                changes: outcome.changes,
            }],
        };
        self.compact_if_configured(&mut update);
        Ok(update)
    }

    /// Give an item a new size, then compact if configured.
    ///
    /// Static items keep their size. With collision prevention, a size that
    /// would overlap another item is refused. With a column bound, `w` is
    /// clamped so the item stays on the grid.
    pub fn resize_item(&mut self, id: &str, w: u32, h: u32) -> Result<LayoutUpdate> {
        let idx = self.lookup(id)?;
        if w == 0 || h == 0 {
            return Err(LayoutError::ZeroSize {
                id: self.items[idx].id.clone(),
            });
        }
        let item_id = self.items[idx].id.clone();
        if self.items[idx].is_static {
            debug!(item = %item_id, "static item ignores resize");
            return Ok(LayoutUpdate {
                events: vec![LayoutEvent::Resized {
                    id: item_id,
                    status: MoveStatus::StaticItem,
                    changes: Vec::new(),
                }],
            });
        }

        let w = match self.config.cols {
            Some(cols) => w.min(cols.saturating_sub(self.items[idx].x)).max(1),
            None => w,
        };

        let before = RectSnapshot::capture(&self.items);
        self.items[idx].w = w;
        self.items[idx].h = h;

        let blocked = self.config.prevent_collision
            && (0..self.items.len()).any(|other| collides_at(&self.items, idx, other));
        let status = if blocked {
            debug!(item = %item_id, w, h, "resize rejected: target occupied");
            before.restore(&mut self.items);
            MoveStatus::Rejected
        } else {
            MoveStatus::Applied
        };

        let mut update = LayoutUpdate {
            events: vec![LayoutEvent::Resized {
                id: item_id,
                status,
                changes: before.diff(&self.items),
            }],
        };
        self.compact_if_configured(&mut update);
        Ok(update)
    }

    /// Run a compaction pass with the configured mode.
    pub fn compact(&mut self) -> LayoutUpdate {
        let changes = compact(&mut self.items, self.config.vertical_compact);
        LayoutUpdate {
            events: vec![LayoutEvent::Compacted { changes }],
        }
    }

    fn compact_if_configured(&mut self, update: &mut LayoutUpdate) {
        if self.config.compact_after_move {
            update.events.extend(self.compact().events);
        }
    }

    fn lookup(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| LayoutError::unknown(id))
    }
}
