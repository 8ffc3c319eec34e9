//! Configuration
//!
//! Layered configuration for a scan: logging, aggregation workers, reading speed
//! and directory-walk options. Sources merge from a global file, a `wordtree.toml`
//! in the scanned directory and `WORDTREE__*` environment variables, lowest to highest.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::aggregate::AggregationConfig;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::run::ReadingConfig;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};

/// Complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordtreeConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub scan: WalkerConfig,
}

impl WordtreeConfig {
    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.aggregation.max_workers == Some(0) {
            return Err(ApiError::ConfigError(
                "aggregation.max_workers must be at least 1".to_string(),
            ));
        }
        if self.reading.words_per_minute == 0 {
            return Err(ApiError::ConfigError(
                "reading.words_per_minute must be at least 1".to_string(),
            ));
        }
        if self.logging.format != "json" && self.logging.format != "text" {
            return Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.logging.format
            )));
        }
        Ok(())
    }
}
