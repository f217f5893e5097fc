//! Extractor configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ExtractError, Result};

/// Top-level configuration, usually stored as `tagschema.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub scanner: ScannerSettings,
    #[serde(default)]
    pub naming: NamingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerSettings {
    /// Struct tag key whose value holds the directive list (e.g. `gorm:"..."`).
    #[serde(default = "default_tag_key")]
    pub tag_key: String,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            tag_key: default_tag_key(),
        }
    }
}

fn default_tag_key() -> String {
    "gorm".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingSettings {
    /// Keep field names as written instead of converting them to snake_case.
    #[serde(default)]
    pub no_lower_case: bool,
}

impl ExtractorConfig {
    /// Parse configuration from TOML text. Missing sections fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded extractor config from {}", path.display());
        Ok(config)
    }
}
