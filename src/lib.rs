//! wordtree: Folder Ingestion and Word-Count Aggregation
//!
//! Builds a sorted folder/file tree from a flat list of files, counts the words in
//! every supported document (fb2, rtf, epub, txt, docx, and zip archives of them)
//! and sums the counts bottom-up so every folder carries the total of its subtree.

pub mod aggregate;
pub mod archive;
pub mod config;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod format;
pub mod logging;
pub mod report;
pub mod run;
pub mod source;
pub mod tooling;
pub mod tree;
pub mod types;

pub use aggregate::WordCountAggregator;
pub use error::{ApiError, RunError};
pub use run::{RunCoordinator, RunPhase, RunReport, RunStatistics};
pub use source::{ByteSource, SourceEntry};
pub use tree::{Node, TreeBuilder};
pub use types::WordCount;
