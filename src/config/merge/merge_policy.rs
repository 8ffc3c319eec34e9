//! Builder defaults shared by every load path.

use crate::run::DEFAULT_WORDS_PER_MINUTE;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder with the defaults every other source overrides.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("reading.words_per_minute", i64::from(DEFAULT_WORDS_PER_MINUTE))?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")
}
