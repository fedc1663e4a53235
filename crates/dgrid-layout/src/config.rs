#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Captures the behaviour switches of [`LayoutEngine`](crate::LayoutEngine)
//! as data that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # dgrid.toml
//! vertical_compact = true
//! prevent_collision = false
//! cols = 12
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("dgrid.toml")?;
//! let config = EngineConfig::from_json_str(r#"{"prevent_collision": true}"#)?;
//! ```
//!
//! # Defaults
//!
//! Missing keys take their defaults, so a partial file only overrides what
//! it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Behaviour switches for a [`LayoutEngine`](crate::LayoutEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pull items up to close vertical gaps during compaction.
    pub vertical_compact: bool,
    /// Reject moves and resizes that would overlap another item instead of
    /// displacing it.
    pub prevent_collision: bool,
    /// Run compaction after every move and resize.
    pub compact_after_move: bool,
    /// Number of grid columns. `None` leaves the grid unbounded to the right.
    pub cols: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vertical_compact: true,
            prevent_collision: false,
            compact_after_move: true,
            cols: None,
        }
    }
}

impl EngineConfig {
    /// Set vertical compaction.
    #[must_use]
    pub fn vertical_compact(mut self, enabled: bool) -> Self {
        self.vertical_compact = enabled;
        self
    }

    /// Set collision prevention.
    #[must_use]
    pub fn prevent_collision(mut self, enabled: bool) -> Self {
        self.prevent_collision = enabled;
        self
    }

    /// Set compaction after each move and resize.
    #[must_use]
    pub fn compact_after_move(mut self, enabled: bool) -> Self {
        self.compact_after_move = enabled;
        self
    }

    /// Bound the grid to `cols` columns.
    #[must_use]
    pub fn cols(mut self, cols: u32) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path.as_ref())?)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read(path.as_ref())?)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.cols == Some(0) {
            errors.push("cols must be > 0 when set".into());
        }
        errors
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_compact_vertically() {
        let config = EngineConfig::default();
        assert!(config.vertical_compact);
        assert!(!config.prevent_collision);
        assert!(config.compact_after_move);
        assert_eq!(config.cols, None);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn partial_override_preserves_defaults() {
        let config = EngineConfig::from_json_str(r#"{"prevent_collision": true}"#).unwrap();
        assert!(config.prevent_collision);
        assert!(config.vertical_compact);
        assert!(config.compact_after_move);
    }

    #[test]
    fn toml_round_trip() {
        let config = EngineConfig::from_toml_str("vertical_compact = false\ncols = 12\n").unwrap();
        assert_eq!(config, EngineConfig::default().vertical_compact(false).cols(12));
    }

    #[test]
    fn zero_cols_is_reported() {
        let problems = EngineConfig::default().cols(0).validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("cols"));
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str(r#"{"cols": "twelve"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("vertical_compact = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn loads_from_files() {
        let mut toml_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(toml_file, "prevent_collision = true").unwrap();
        let config = EngineConfig::from_toml_file(toml_file.path()).unwrap();
        assert!(config.prevent_collision);

        let mut json_file = tempfile::NamedTempFile::new().unwrap();
        write!(json_file, r#"{{"compact_after_move": false}}"#).unwrap();
        let config = EngineConfig::from_json_file(json_file.path()).unwrap();
        assert!(!config.compact_after_move);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::from_toml_file("/nonexistent/dgrid.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("dgrid.toml")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
