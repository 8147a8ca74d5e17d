// src/config.rs
//
// Rewrite generation settings
//
// Every field has a default, so a config file only needs the keys it overrides.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Suffix appended to category URL paths unless a store overrides it
pub const DEFAULT_CATEGORY_URL_SUFFIX: &str = ".html";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Suffix for category URLs, e.g. ".html". May be empty.
    pub category_url_suffix: String,

    /// Per-store suffix overrides, keyed by store id
    pub store_url_suffixes: HashMap<u32, String>,

    /// Initial "save rewrites history" flag for categories built from
    /// external input that do not carry their own
    pub save_rewrites_history_default: bool,

    /// SQLite database location. None means the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            category_url_suffix: DEFAULT_CATEGORY_URL_SUFFIX.to_string(),
            store_url_suffixes: HashMap::new(),
            save_rewrites_history_default: true,
            database_path: None,
        }
    }
}

impl RewriteConfig {
    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid rewrite config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::debug!("Loaded rewrite config from {}", path.display());
        Ok(config)
    }

    /// Suffix for the given store, falling back to the global one
    pub fn category_url_suffix_for(&self, store_id: u32) -> &str {
        self.store_url_suffixes
            .get(&store_id)
            .map(String::as_str)
            .unwrap_or(&self.category_url_suffix)
    }

    /// Suffixes are appended to a path segment, so they cannot contain '/'
    fn validate(&self) -> AppResult<()> {
        let suffixes = std::iter::once(&self.category_url_suffix).chain(self.store_url_suffixes.values());
        for suffix in suffixes {
            if suffix.contains('/') {
                return Err(AppError::Config(format!(
                    "URL suffix '{}' cannot contain '/'",
                    suffix
                )));
            }
        }
        Ok(())
    }
}
