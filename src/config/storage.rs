//! StorageConfig: where the sled store lives.

use super::xdg;
use crate::error::IndexerError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store directory; None means `$XDG_DATA_HOME/nesting-index/store`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the store directory, with `cli_path` taking precedence over config.
    pub fn resolve_path(&self, cli_path: Option<PathBuf>) -> Result<PathBuf, IndexerError> {
        if let Some(path) = cli_path.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(path);
        }
        if let Some(path) = self.path.clone().filter(|p| !p.as_os_str().is_empty()) {
            return Ok(path);
        }
        xdg::default_store_path().ok_or_else(|| {
            IndexerError::ConfigError(
                "Could not determine XDG data home directory (HOME not set)".to_string(),
            )
        })
    }
}
