//! MergeService: orchestrates sources, applies merge policy, deserializes to IndexerConfig.

use super::policy;
use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::IndexerConfig;
use config::ConfigError;
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<IndexerConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Precedence: defaults (lowest) -> global file -> `path` -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<IndexerConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = explicit_file::add_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Same layering as [`MergeService::load_from_file`] with the global file named by the caller.
    pub fn load_layers(global: &Path, explicit: &Path) -> Result<IndexerConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_path_to_builder(builder, global)?;
        let builder = explicit_file::add_to_builder(builder, explicit)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
