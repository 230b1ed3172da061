//! Front-end configuration, loadable from TOML.
//!
//! ```toml
//! layout = "Diamond"
//! hints = true
//! jump_delay_ms = 120
//!
//! [[layouts]]
//! name = "Plus"
//! description = "A small plus"
//! board = [
//!     [-1, -1, -1, -1, -1, -1, -1],
//!     [-1, -1, -1,  1, -1, -1, -1],
//!     [-1, -1, -1,  1, -1, -1, -1],
//!     [-1,  1,  1,  0,  1,  1, -1],
//!     [-1, -1, -1,  1, -1, -1, -1],
//!     [-1, -1, -1,  1, -1, -1, -1],
//!     [-1, -1, -1, -1, -1, -1, -1],
//! ]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Catalog, Layout, LayoutData, LayoutError, DEFAULT_LAYOUT};

/// Longest accepted pause between accepting a jump and applying it.
pub const MAX_JUMP_DELAY_MS: u32 = 2000;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("unknown layout '{0}'")]
    UnknownLayout(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Layout dealt at startup.
    pub layout: String,
    /// Highlight legal destinations for the selected peg.
    pub hints: bool,
    /// Pause between accepting a jump and applying it, for the jump highlight.
    pub jump_delay_ms: u32,
    /// Fixed frame interval of the terminal loop.
    pub tick_ms: u32,
    /// Extra layouts appended to the built-in catalog.
    pub layouts: Vec<LayoutData>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            layout: DEFAULT_LAYOUT.to_string(),
            hints: true,
            jump_delay_ms: 120,
            tick_ms: 16,
            layouts: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Validation("tick_ms must be > 0".into()));
        }
        if self.jump_delay_ms > MAX_JUMP_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "jump_delay_ms must be <= {MAX_JUMP_DELAY_MS}"
            )));
        }
        if self.layout.trim().is_empty() {
            return Err(ConfigError::Validation("layout must not be empty".into()));
        }
        Ok(())
    }

    /// Built-in layouts plus the configured ones, all validated.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let extra = self
            .layouts
            .iter()
            .map(Layout::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Catalog::with_layouts(extra)?)
    }

    /// Index of the configured starting layout in `catalog`.
    pub fn layout_index(&self, catalog: &Catalog) -> Result<usize, ConfigError> {
        catalog
            .index_of(&self.layout)
            .ok_or_else(|| ConfigError::UnknownLayout(self.layout.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLUS: &str = r#"
        layout = "plus"
        jump_delay_ms = 0

        [[layouts]]
        name = "Plus"
        description = "A small plus"
        board = [
            [-1, -1, -1, -1, -1, -1, -1],
            [-1, -1, -1,  1, -1, -1, -1],
            [-1, -1, -1,  1, -1, -1, -1],
            [-1,  1,  1,  0,  1,  1, -1],
            [-1, -1, -1,  1, -1, -1, -1],
            [-1, -1, -1,  1, -1, -1, -1],
            [-1, -1, -1, -1, -1, -1, -1],
        ]
    "#;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout, "Classic Cross");
        assert!(config.hints);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml("hints = false").unwrap();
        assert!(!config.hints);
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.jump_delay_ms, 120);
    }

    #[test]
    fn test_custom_layout_joins_catalog() {
        let config = AppConfig::from_toml(PLUS).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(config.layout_index(&catalog).unwrap(), 4);
    }

    #[test]
    fn test_ragged_custom_layout_fails_at_load() {
        let broken = PLUS.replace("[-1,  1,  1,  0,  1,  1, -1],", "[-1,  1,  1,  0,  1,  1],");
        let config = AppConfig::from_toml(&broken).unwrap();
        let err = config.catalog().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Layout(LayoutError::RaggedRow { row: 3, len: 6, .. })
        ));
    }

    #[test]
    fn test_padded_custom_layout_name_resolves() {
        let padded = PLUS
            .replace("layout = \"plus\"", "layout = \"Plus \"")
            .replace("name = \"Plus\"", "name = \"Plus \"");
        let config = AppConfig::from_toml(&padded).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(config.layout_index(&catalog).unwrap(), 4);
        assert_eq!(catalog.at(4).unwrap().name(), "Plus");
    }

    #[test]
    fn test_unknown_layout() {
        let config = AppConfig {
            layout: "Hexagon".into(),
            ..AppConfig::default()
        };
        let catalog = config.catalog().unwrap();
        let err = config.layout_index(&catalog).unwrap_err();
        assert_eq!(err.to_string(), "unknown layout 'Hexagon'");
    }

    #[test]
    fn test_validation_errors() {
        let err = AppConfig::from_toml("tick_ms = 0").unwrap_err();
        assert_eq!(err.to_string(), "config validation error: tick_ms must be > 0");

        let err = AppConfig::from_toml("jump_delay_ms = 5000").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_bad_toml() {
        let err = AppConfig::from_toml("hints = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
