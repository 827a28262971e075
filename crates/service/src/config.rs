//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock configuration.

use crate::error::{ConfigError, Result};
use engagement::HintScope;
use pipeline::CategoryUniverse;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Default length of the popular-events rail
pub const DEFAULT_POPULAR_LIMIT: usize = 3;

/// Default number of rows per page in the CLI
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Category universes used by visibility and the category pickers
    pub categories: CategoryUniverse,
    /// Whether the favorites hint is shown once overall or once per viewer
    pub hint_scope: HintScope,
    pub popular_limit: usize,
    pub page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            categories: CategoryUniverse::default(),
            hint_scope: HintScope::default(),
            popular_limit: DEFAULT_POPULAR_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
