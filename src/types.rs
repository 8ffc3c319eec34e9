//! Core types shared across the ingestion pipeline.

use serde::{Serialize, Serializer};

/// Path of a node from the root, one entry per segment. The root's path is empty.
pub type NodePath = Vec<String>;

/// Node kind. Folders order before files among siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// Word count state of a node.
///
/// Files distinguish "not a document" from "extraction failed"; folders distinguish
/// "not yet aggregated" from "aggregated to zero".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordCount {
    /// The file's format is not eligible for counting.
    Ineligible,
    /// Eligible but not computed yet.
    #[default]
    Pending,
    /// Extraction was attempted and failed, or an archive held nothing countable.
    Unknown,
    Counted(u64),
}

impl WordCount {
    /// Count as contributed to a parent folder; absent values add nothing.
    pub fn contribution(&self) -> u64 {
        match self {
            WordCount::Counted(n) => *n,
            _ => 0,
        }
    }

    pub fn value(&self) -> Option<u64> {
        match self {
            WordCount::Counted(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, WordCount::Pending)
    }

    /// True when the field is left out of serialized output entirely.
    pub fn is_omitted(&self) -> bool {
        matches!(self, WordCount::Ineligible | WordCount::Pending)
    }
}

impl From<Option<u64>> for WordCount {
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(n) => WordCount::Counted(n),
            None => WordCount::Unknown,
        }
    }
}

impl Serialize for WordCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}
