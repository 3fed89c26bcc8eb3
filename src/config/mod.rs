//! Configuration
//!
//! Layered configuration for reindexing passes, the store location and logging.
//! Sources, lowest precedence first: built-in defaults, the global config file,
//! an explicit file, `NESTING_INDEX__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
mod storage;
mod validation;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage::StorageConfig;
pub use validation::validate;

use crate::logging::LoggingConfig;
use crate::reindex::CycleGuard;
use crate::types::DEFAULT_HOP_CEILING;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexerConfig {
    #[serde(default)]
    pub reindex: ReindexConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings applied to every reindexing pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReindexConfig {
    /// Remaining-hops budget given to seed work items. Must exceed the deepest legitimate nesting.
    #[serde(default = "default_hop_ceiling")]
    pub hop_ceiling: u32,

    /// Also fail when an id is reached again through its own descendants
    #[serde(default)]
    pub strict_cycle_detection: bool,
}

fn default_hop_ceiling() -> u32 {
    DEFAULT_HOP_CEILING
}

impl ReindexConfig {
    pub fn cycle_guard(&self) -> CycleGuard {
        if self.strict_cycle_detection {
            CycleGuard::Strict
        } else {
            CycleGuard::HopBudget
        }
    }
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self {
            hop_ceiling: default_hop_ceiling(),
            strict_cycle_detection: false,
        }
    }
}
