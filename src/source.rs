//! Byte sources for ingested files
//!
//! The tree records a file's size when it is built; content is only read when the
//! aggregator counts the file. In-memory sources hand out their bytes, on-disk
//! sources read lazily.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable content of one ingested file.
pub trait ByteSource: Send + Sync + fmt::Debug {
    /// Byte length, known without reading the content.
    fn len(&self) -> u64;

    /// Read the full content.
    fn read(&self) -> std::io::Result<Vec<u8>>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bytes already held in memory.
#[derive(Clone)]
pub struct InMemorySource {
    bytes: Arc<[u8]>,
}

impl InMemorySource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for InMemorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySource")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ByteSource for InMemorySource {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.to_vec())
    }
}

/// A file on disk, read when counted.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    len: u64,
}

impl FileSource {
    /// Stat the file now; its content is read later.
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let len = std::fs::metadata(&path)?.len();
        Ok(Self { path, len })
    }

    /// Use a length already known from a directory walk.
    pub fn with_len(path: impl Into<PathBuf>, len: u64) -> Self {
        Self {
            path: path.into(),
            len,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

/// One input file: its path segments and its content.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub path: Vec<String>,
    pub size: u64,
    pub source: Arc<dyn ByteSource>,
}

impl SourceEntry {
    /// Build an entry from path segments; empty segments are dropped.
    pub fn new<I, S>(segments: I, source: Arc<dyn ByteSource>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = segments
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();
        let size = source.len();
        Self { path, size, source }
    }

    /// Entry from a `/`-separated relative path and in-memory bytes.
    pub fn from_bytes(relative_path: &str, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(
            relative_path.split('/'),
            Arc::new(InMemorySource::new(bytes)),
        )
    }

    pub fn name(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}
