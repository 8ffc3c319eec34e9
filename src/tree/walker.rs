//! Directory discovery
//!
//! Walks a directory on disk and yields one [`SourceEntry`] per regular file. Entry
//! paths start with the directory's own name, so they feed [`TreeBuilder::new`]
//! directly. File content is not read here.
//!
//! Folders exist in the tree only as ancestors of files, so a directory with no
//! files anywhere below it produces no entry and does not appear.
//!
//! [`TreeBuilder::new`]: crate::tree::builder::TreeBuilder::new

use crate::error::ApiError;
use crate::source::{FileSource, SourceEntry};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory walk options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Include dot-files and dot-directories (default: true)
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            max_depth: None,
            include_hidden: true,
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

fn root_segment(root: &Path) -> Result<String, ApiError> {
    let named = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    if let Some(name) = named {
        return Ok(name);
    }
    let canonical = root.canonicalize()?;
    Ok(canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| canonical.to_string_lossy().into_owned()))
}

/// Discover every regular file under `root`, in file-name order.
pub fn discover(root: &Path, config: &WalkerConfig) -> Result<Vec<SourceEntry>, ApiError> {
    if !root.is_dir() {
        return Err(ApiError::ConfigError(format!(
            "Not a directory: {}",
            root.display()
        )));
    }
    let root_name = root_segment(root)?;

    let mut walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name();
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }

    let include_hidden = config.include_hidden;
    let mut entries = Vec::new();
    for item in walker
        .into_iter()
        .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e))
    {
        let dir_entry = match item {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !dir_entry.file_type().is_file() {
            continue;
        }
        let len = match dir_entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                warn!(
                    path = %dir_entry.path().display(),
                    error = %e,
                    "Skipping file without metadata"
                );
                continue;
            }
        };
        let Ok(relative) = dir_entry.path().strip_prefix(root) else {
            continue;
        };

        let mut segments = vec![root_name.clone()];
        segments.extend(relative.components().filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        }));
        let source = FileSource::with_len(dir_entry.path(), len);
        entries.push(SourceEntry::new(segments, Arc::new(source)));
    }

    debug!(root = %root.display(), files = entries.len(), "Directory discovered");
    Ok(entries)
}
