//! Error types
//!
//! Per-file and per-entry errors are contained where they happen and end up as an
//! unknown word count on the affected node. Only an empty input set is fatal to a run.

use thiserror::Error;

/// Failure to produce text from a single document's bytes.
///
/// Both decoders are total (malformed sequences become U+FFFD), so reading the
/// byte source is the only way extraction can fail.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read document bytes: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while expanding a zip archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The container itself is not a readable zip archive.
    #[error("not a valid zip archive: {0}")]
    Parse(#[from] zip::result::ZipError),

    /// A single member could not be read; siblings are unaffected.
    #[error("failed to extract archive entry {name}: {reason}")]
    Entry { name: String, reason: String },
}

/// Errors raised while building the folder tree.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no files supplied")]
    EmptyInput,
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("run failed: no files supplied")]
    EmptyInput,

    /// A reset happened while the run was in flight; its results were discarded.
    #[error("run {run_id} was reset before it completed")]
    Superseded { run_id: u64 },
}

impl From<BuildError> for RunError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::EmptyInput => RunError::EmptyInput,
        }
    }
}

/// Errors at the configuration, logging and CLI surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Run(#[from] RunError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
