//! Environment variable source: WORDTREE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses WORDTREE__ prefix and __ as separator for nested keys, e.g.
/// `WORDTREE__AGGREGATION__MAX_WORKERS=4`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("WORDTREE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
