//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::WordtreeConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a scan of `scan_root` from files and environment.
    pub fn load(scan_root: &Path) -> Result<WordtreeConfig, ApiError> {
        let config = MergeService::load(scan_root)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<WordtreeConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}
