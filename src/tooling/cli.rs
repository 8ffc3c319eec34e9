//! CLI Tooling
//!
//! `wordtree scan` walks a directory, runs one ingestion pass and prints the report.
//! `wordtree count` counts a single file.

use crate::aggregate::{count_file, WordCountAggregator};
use crate::config::{ConfigLoader, WordtreeConfig};
use crate::error::ApiError;
use crate::format::FileClass;
use crate::logging::init_logging;
use crate::report::{format_report_json, format_report_text};
use crate::run::RunCoordinator;
use crate::source::{ByteSource, FileSource};
use crate::tree::walker::discover;
use crate::types::WordCount;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// wordtree - word counts for a folder of documents
#[derive(Parser)]
#[command(name = "wordtree")]
#[command(about = "Build a folder tree of documents and aggregate their word counts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory and print its word-count tree
    Scan {
        /// Directory to scan
        dir: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Concurrent file counts (default: available parallelism)
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Print the word count of a single file
    Count {
        /// File to count
        file: PathBuf,
    },
}

impl Commands {
    /// Directory whose `wordtree.toml` applies to this command.
    pub fn config_root(&self) -> PathBuf {
        match self {
            Commands::Scan { dir, .. } => dir.clone(),
            Commands::Count { file } => file
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// CLI context holding the resolved configuration
pub struct CliContext {
    config: WordtreeConfig,
    scan_root: Option<PathBuf>,
}

impl CliContext {
    /// Load configuration from `config_path`, or from the layered sources for `root`.
    pub fn new(root: &Path, config_path: Option<&Path>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(root)?,
        };
        Ok(Self {
            config,
            scan_root: Some(root.to_path_buf()),
        })
    }

    pub fn from_config(config: WordtreeConfig) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self {
            config,
            scan_root: None,
        })
    }

    pub fn config(&self) -> &WordtreeConfig {
        &self.config
    }

    /// Fold the `--log-*` flags into the logging section.
    pub fn apply_log_flags(&mut self, cli: &Cli) {
        let logging = &mut self.config.logging;
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
    }

    pub fn init_logging(&self) -> Result<(), ApiError> {
        init_logging(Some(&self.config.logging), self.scan_root.as_deref())
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Scan {
                dir,
                format,
                workers,
            } => self.scan(dir, format, *workers),
            Commands::Count { file } => self.count(file),
        }
    }

    fn scan(&self, dir: &Path, format: &str, workers: Option<usize>) -> Result<String, ApiError> {
        if format != "text" && format != "json" {
            return Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                format
            )));
        }
        let mut aggregation = self.config.aggregation.clone();
        if workers.is_some() {
            aggregation.max_workers = workers;
        }
        if aggregation.max_workers == Some(0) {
            return Err(ApiError::ConfigError(
                "--workers must be at least 1".to_string(),
            ));
        }

        let started = Instant::now();
        let entries = discover(dir, &self.config.scan)?;
        info!(dir = %dir.display(), files = entries.len(), "Scan discovered files");

        let coordinator = RunCoordinator::new(
            WordCountAggregator::from_config(&aggregation),
            self.config.reading.clone(),
        );
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let report = runtime.block_on(coordinator.run(entries))?;
        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            "Scan finished"
        );

        if format == "json" {
            Ok(format_report_json(&report)?)
        } else {
            Ok(format_report_text(&report))
        }
    }

    fn count(&self, file: &Path) -> Result<String, ApiError> {
        let source = FileSource::open(file)?;
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let class = FileClass::of_name(&name);
        let count = count_file(
            &file.display().to_string(),
            class,
            Some(&source as &dyn ByteSource),
        );
        Ok(format_count_line(count, file))
    }
}

fn format_count_line(count: WordCount, file: &Path) -> String {
    match count {
        WordCount::Counted(words) => format!("{}\t{}", words, file.display()),
        _ => format!("-\t{}", file.display()),
    }
}
