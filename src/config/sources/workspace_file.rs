//! `wordtree.toml` at the root of the scanned directory.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};

pub const WORKSPACE_CONFIG_FILE: &str = "wordtree.toml";

pub fn workspace_config_path(scan_root: &Path) -> PathBuf {
    scan_root.join(WORKSPACE_CONFIG_FILE)
}

/// Add the scan root's config file; optional.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    scan_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_config_path(scan_root);
    Ok(builder.add_source(File::from(path).required(false)))
}
