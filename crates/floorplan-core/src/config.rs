//! Editor configuration.

use crate::grid::{DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Cache key under which the working design is kept.
pub const CURRENT_DESIGN_KEY: &str = "current_design";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}

fn default_cache_key() -> String {
    CURRENT_DESIGN_KEY.to_string()
}

/// Settings for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    #[serde(default = "default_grid_size", alias = "grid_size")]
    pub grid_size: u32,
    #[serde(default = "default_cell_size", alias = "cell_size")]
    pub cell_size: f64,
    /// Local cache key for the working design.
    #[serde(default = "default_cache_key", alias = "cache_key")]
    pub cache_key: String,
    /// Surface rectangle to assume before the host reports one.
    #[serde(default, alias = "default_surface", skip_serializing_if = "Option::is_none")]
    pub default_surface: Option<Rect>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            cache_key: default_cache_key(),
            default_surface: None,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Logical side length of the drawing surface.
    pub fn logical_size(&self) -> f64 {
        self.grid_size as f64 * self.cell_size
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::Invalid("grid size must be positive".into()));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grid size {} exceeds {}",
                self.grid_size, MAX_GRID_SIZE
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell size {} must be positive",
                self.cell_size
            )));
        }
        if self.cache_key.is_empty() {
            return Err(ConfigError::Invalid("cache key must not be empty".into()));
        }
        Ok(())
    }
}
