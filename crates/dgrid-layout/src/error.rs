#![forbid(unsafe_code)]

//! Error types.
//!
//! The algorithms themselves are infallible: moving a static item is a
//! no-op and a blocked move is rolled back silently. Errors only come from
//! looking up an id that is not in the layout, from validating a layout,
//! and from loading configuration.

use std::path::PathBuf;

use dgrid_core::ItemId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("no item with id {id:?} in the layout")]
    UnknownItem { id: String },

    #[error("item id {id} appears more than once")]
    DuplicateId { id: ItemId },

    #[error("item {id} has zero width or height")]
    ZeroSize { id: ItemId },

    #[error("item {id} does not fit in {cols} columns")]
    OutOfBounds { id: ItemId, cols: u32 },

    #[error("invalid engine configuration: {}", problems.join("; "))]
    InvalidConfig { problems: Vec<String> },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LayoutError {
    pub(crate) fn unknown(id: &str) -> Self {
        Self::UnknownItem { id: id.to_owned() }
    }
}

/// Errors that can occur when loading an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
