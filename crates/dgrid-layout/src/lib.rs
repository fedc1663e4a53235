#![forbid(unsafe_code)]

//! Layout engine for draggable, resizable grids.
//!
//! Given items with grid coordinates and sizes, decides where each item ends
//! up after a move, pushes overlapped items out of the way, and re-packs
//! the layout to remove vertical gaps.
//!
//! # Pieces
//! - [`collision`]: pairwise overlap tests and layout queries built on them.
//! - [`order`]: row-major ordering shared by the resolver and the compactor.
//! - [`resolver`]: [`move_element`] and its displacement cascade.
//! - [`compact`](mod@compact): [`compact()`] and [`compact_item`].
//! - [`engine`]: [`LayoutEngine`], which owns a layout, applies
//!   [`EngineConfig`] and reports what changed as [`LayoutEvent`]s.
//!
//! Everything runs synchronously on the caller's thread and mutates the
//! slice it is given in place. Nothing is emitted; every mutating call
//! returns the list of [`LayoutChange`]s it made.

pub mod change;
pub mod collision;
pub mod compact;
pub mod config;
pub mod debug;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod order;
pub mod resolver;

pub use dgrid_core::{CellRect, GridItem, ItemId};

pub use change::LayoutChange;
pub use collision::{collides, get_all_collisions, get_first_collision, get_statics};
pub use compact::{compact, compact_item};
pub use config::EngineConfig;
pub use debug::{CascadeRecord, LayoutDebugger, render_ascii};
pub use engine::{LayoutEngine, LayoutEvent, LayoutUpdate, validate_layout};
pub use error::{ConfigError, LayoutError, Result};
pub use geometry::bottom;
pub use order::sort_layout_items_by_row_col;
pub use resolver::{
    CascadeStep, DisplaceKind, MoveOutcome, MoveRequest, MoveStatus, move_element,
    move_element_away_from_collision,
};
