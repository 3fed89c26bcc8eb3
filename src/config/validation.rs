//! Validation of loaded configuration.

use super::IndexerConfig;
use crate::error::IndexerError;
use crate::logging::{parse_log_format, parse_output_destinations};

/// Reject configuration no pass or logger could run with.
pub fn validate(config: &IndexerConfig) -> Result<(), IndexerError> {
    if config.reindex.hop_ceiling == 0 {
        return Err(IndexerError::ConfigError(
            "reindex.hop_ceiling must be at least 1".to_string(),
        ));
    }
    parse_log_format(&config.logging.format)?;
    parse_output_destinations(&config.logging.output)?;
    Ok(())
}
