#![forbid(unsafe_code)]

//! Core: grid-cell geometry, item records, and the logging facade.
//!
//! # Role in dgrid
//! `dgrid-core` holds the plain data the layout engine operates on. It has
//! no algorithms of its own; `dgrid-layout` consumes [`GridItem`] slices and
//! rewrites their coordinates.
//!
//! # Primary responsibilities
//! - **CellRect**: half-open rectangles in grid-cell units.
//! - **GridItem / ItemId**: the one entity a layout is made of.
//! - **Logging**: tracing macros that compile to nothing unless the
//!   `tracing` feature is enabled.

pub mod geometry;
pub mod item;
pub mod logging;

pub use geometry::CellRect;
pub use item::{GridItem, ItemId};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
