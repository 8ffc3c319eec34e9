//! Zip archive expansion
//!
//! An archive is one file node. Its word count is the sum over the eligible
//! documents it contains; a total of zero means the archive is not a countable
//! document and its count is unknown rather than zero.

use crate::error::ArchiveError;
use crate::extract;
use crate::format::FileClass;
use std::io::{Cursor, Read};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Per-archive tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Sum of the non-zero per-document counts.
    pub total_words: u64,
    /// Eligible document entries that were read.
    pub documents: usize,
    /// Eligible entries that could not be read.
    pub failed_entries: usize,
}

impl ArchiveSummary {
    /// Archive word count: `None` when nothing countable was found.
    pub fn word_count(&self) -> Option<u64> {
        (self.total_words > 0).then_some(self.total_words)
    }
}

fn read_entry<R: Read>(
    entry: &mut R,
    name: &str,
    size_hint: u64,
) -> Result<Vec<u8>, ArchiveError> {
    let mut buf = Vec::with_capacity(size_hint.min(64 * 1024 * 1024) as usize);
    entry.read_to_end(&mut buf).map_err(|e| ArchiveError::Entry {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(buf)
}

/// Expand an archive and count every eligible document inside it.
///
/// Only a container that cannot be opened is an error; unreadable members are
/// logged, tallied in [`ArchiveSummary::failed_entries`] and skipped.
pub fn try_expand_archive(bytes: &[u8]) -> Result<ArchiveSummary, ArchiveError> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;
    let mut summary = ArchiveSummary::default();

    for index in 0..zip.len() {
        let mut entry = match zip.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                let err = ArchiveError::Entry {
                    name: format!("#{}", index),
                    reason: e.to_string(),
                };
                warn!(error = %err, "Skipping unreadable archive entry");
                summary.failed_entries += 1;
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let FileClass::Document(format) = FileClass::of_name(&name) else {
            continue;
        };

        let size = entry.size();
        match read_entry(&mut entry, &name, size) {
            Ok(content) => {
                let words = extract::extract_word_count(&content, format);
                debug!(entry = %name, words, "Counted archive entry");
                summary.documents += 1;
                if words > 0 {
                    summary.total_words += words;
                }
            }
            Err(err) => {
                warn!(error = %err, "Skipping unreadable archive entry");
                summary.failed_entries += 1;
            }
        }
    }

    Ok(summary)
}

/// Archive word count, or `None` when the archive cannot be parsed or holds no
/// countable text.
pub fn expand_archive(bytes: &[u8]) -> Option<u64> {
    match try_expand_archive(bytes) {
        Ok(summary) => summary.word_count(),
        Err(err) => {
            warn!(error = %err, "Failed to expand archive");
            None
        }
    }
}
