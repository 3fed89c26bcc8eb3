//! Merge policy: defaults every builder starts from.

use crate::types::DEFAULT_HOP_CEILING;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the built-in defaults (lowest precedence).
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("reindex.hop_ceiling", i64::from(DEFAULT_HOP_CEILING))?
        .set_default("reindex.strict_cycle_detection", false)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
