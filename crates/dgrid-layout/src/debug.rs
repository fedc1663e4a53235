#![forbid(unsafe_code)]

//! Move cascade debugging utilities.
//!
//! Provides introspection into move resolution:
//! - Recording of each move call with its displacement steps
//! - Textual occupancy maps of a layout
//!
//! Recording is a no-op unless explicitly enabled at runtime.
//!
//! # Usage
//!
//! ```ignore
//! use dgrid_layout::debug::LayoutDebugger;
//!
//! let debugger = LayoutDebugger::new();
//! debugger.set_enabled(true);
//! let mut engine = LayoutEngine::new(items, config)?.with_debugger(debugger.clone());
//!
//! // ... drag things around ...
//!
//! print!("{}", debugger.report());
//! ```

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dgrid_core::{GridItem, ItemId};

use crate::geometry::{bottom, right};
use crate::resolver::{CascadeStep, DisplaceKind, MoveStatus};

/// A record of a single move call.
#[derive(Debug, Clone)]
pub struct CascadeRecord {
    /// The item the caller asked to move.
    pub item: ItemId,
    /// Requested column, if any.
    pub target_x: Option<u32>,
    /// Requested row.
    pub target_y: u32,
    /// How the call ended.
    pub status: MoveStatus,
    /// Displacements in the order they happened.
    pub steps: Vec<CascadeStep>,
    /// Time taken to resolve (if measured).
    pub solve_time: Option<Duration>,
}

impl CascadeRecord {
    /// Number of displacements that took the optimistic slot.
    pub fn optimistic_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.kind == DisplaceKind::Optimistic)
            .count()
    }

    /// Generate a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        let target_x = self
            .target_x
            .map_or_else(|| "_".to_string(), |x| x.to_string());
        let _ = writeln!(
            s,
            "{} -> ({},{}): {:?}",
            self.item, target_x, self.target_y, self.status
        );
        for (i, step) in self.steps.iter().enumerate() {
            let _ = writeln!(
                s,
                "  [{i}] {} away from {}: y {} -> {} ({:?})",
                step.displaced, step.anchor, step.from_y, step.to_y, step.kind
            );
        }
        if let Some(t) = self.solve_time {
            let _ = writeln!(s, "  Solve time: {:?}", t);
        }
        s
    }
}

/// Move cascade debugger.
///
/// Collects cascade records for introspection. Thread-safe via internal
/// synchronization; can be shared across the application.
#[derive(Debug)]
pub struct LayoutDebugger {
    enabled: AtomicBool,
    records: Mutex<Vec<CascadeRecord>>,
}

impl LayoutDebugger {
    /// Create a new debugger wrapped in Arc (disabled by default).
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            enabled: AtomicBool::new(false),
            records: Mutex::new(Vec::new()),
        })
    }

    /// Check if debugging is enabled.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable debugging.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Clear all recorded data.
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    /// Record a move call.
    pub fn record(&self, record: CascadeRecord) {
        if !self.enabled() {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    /// Get a snapshot of all records.
    pub fn snapshot(&self) -> Vec<CascadeRecord> {
        self.records
            .lock()
            .ok()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Records whose move was rejected.
    pub fn rejections(&self) -> Vec<CascadeRecord> {
        self.snapshot()
            .into_iter()
            .filter(|r| r.status == MoveStatus::Rejected)
            .collect()
    }

    /// Generate a summary report of all recorded moves.
    pub fn report(&self) -> String {
        let records = self.snapshot();
        let total_steps: usize = records.iter().map(|r| r.steps.len()).sum();

        let mut s = String::new();
        let _ = writeln!(
            s,
            "=== Cascade Debug Report ({} moves, {} displacements) ===",
            records.len(),
            total_steps
        );
        for record in &records {
            let _ = write!(s, "\n{}", record.summary());
        }
        s
    }
}

/// Render the layout as a character grid.
///
/// Each cell shows the first character of the occupying item's id, `.` when
/// empty, and `#` when more than one item covers it.
pub fn render_ascii(layout: &[GridItem]) -> String {
    let cols = right(layout) as usize;
    let rows = bottom(layout) as usize;
    let mut cells = vec![vec!['.'; cols]; rows];

    for item in layout {
        let glyph = item.id.as_str().chars().next().unwrap_or('?');
        for row in &mut cells[item.y as usize..item.bottom() as usize] {
            for cell in &mut row[item.x as usize..item.rect().right() as usize] {
                *cell = if *cell == '.' { glyph } else { '#' };
            }
        }
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for row in cells {
        out.extend(row);
        out.push('\n');
    }
    out
}
