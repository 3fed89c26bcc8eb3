//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::{validate, IndexerConfig};
use crate::error::IndexerError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment, then validate it.
    pub fn load() -> Result<IndexerConfig, IndexerError> {
        let config = MergeService::load()?;
        validate(&config)?;
        Ok(config)
    }

    /// Load configuration from the global file, a specific file and the environment, then validate it.
    pub fn load_from_file(path: &Path) -> Result<IndexerConfig, IndexerError> {
        let config = MergeService::load_from_file(path)?;
        validate(&config)?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> IndexerConfig {
        IndexerConfig::default()
    }
}
