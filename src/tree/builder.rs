//! Tree Builder
//!
//! Places a flat list of source entries into a sorted folder/file tree, tallying
//! folders, files and bytes on the way.

use crate::error::BuildError;
use crate::source::SourceEntry;
use crate::tree::node::Node;
use crate::types::NodeKind;
use serde::Serialize;
use tracing::{debug, warn};

/// Counts gathered while placing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeTally {
    /// Folders including the root.
    pub folders: u64,
    pub files: u64,
    pub total_size_bytes: u64,
    /// Entries left out: empty or root-only paths, duplicates and folder/file clashes.
    pub skipped: u64,
}

/// Output of a build: the sorted root and its tally.
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub root: Node,
    pub tally: TreeTally,
}

/// How entry paths relate to the root folder.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RootNaming {
    /// First segment of every path is the root folder. The first entry with more
    /// than one segment names it; entries with a single segment carry no placement.
    LeadingSegment,
    /// Paths are relative to a root with this name.
    Named(String),
}

/// Builds a [`Node`] tree from [`SourceEntry`] paths.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root: RootNaming,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Builder for paths whose first segment is the root folder's name.
    pub fn new() -> Self {
        Self {
            root: RootNaming::LeadingSegment,
        }
    }

    /// Builder for paths already relative to a root called `name`.
    pub fn with_root_name(name: impl Into<String>) -> Self {
        Self {
            root: RootNaming::Named(name.into()),
        }
    }

    fn root_name(&self, entries: &[SourceEntry]) -> String {
        match &self.root {
            RootNaming::Named(name) => name.clone(),
            RootNaming::LeadingSegment => entries
                .iter()
                .find(|e| e.path.len() > 1)
                .or_else(|| entries.first())
                .and_then(|e| e.path.first().cloned())
                .unwrap_or_default(),
        }
    }

    fn relative_segments<'a>(&self, entry: &'a SourceEntry) -> &'a [String] {
        match self.root {
            RootNaming::LeadingSegment => entry.path.get(1..).unwrap_or_default(),
            RootNaming::Named(_) => &entry.path[..],
        }
    }

    /// Build and sort the tree. Fails only when no entries are supplied.
    pub fn build<I>(&self, entries: I) -> Result<BuiltTree, BuildError>
    where
        I: IntoIterator<Item = SourceEntry>,
    {
        let entries: Vec<SourceEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(BuildError::EmptyInput);
        }

        let mut root = Node::folder(self.root_name(&entries), Vec::new());
        let mut tally = TreeTally {
            folders: 1,
            ..TreeTally::default()
        };

        for entry in entries {
            if self.place(&mut root, &entry, &mut tally) {
                tally.files += 1;
                tally.total_size_bytes += entry.size;
            } else {
                tally.skipped += 1;
            }
        }

        root.sort_recursive();
        debug!(
            folders = tally.folders,
            files = tally.files,
            bytes = tally.total_size_bytes,
            skipped = tally.skipped,
            "Tree built"
        );
        Ok(BuiltTree { root, tally })
    }

    /// Place one entry; returns false when it was skipped.
    fn place(&self, root: &mut Node, entry: &SourceEntry, tally: &mut TreeTally) -> bool {
        let segments = self.relative_segments(entry);
        let Some((file_name, folders)) = segments.split_last() else {
            warn!(path = %entry.path.join("/"), "Skipping entry without a path below the root");
            return false;
        };

        let mut current = root;
        for segment in folders {
            let index = match current.children.iter().position(|c| &c.name == segment) {
                Some(index) if current.children[index].kind == NodeKind::Folder => index,
                Some(_) => {
                    warn!(
                        path = %entry.path.join("/"),
                        conflict = %segment,
                        "Skipping entry nested under a file"
                    );
                    return false;
                }
                None => {
                    let mut path = current.path.clone();
                    path.push(segment.clone());
                    current.children.push(Node::folder(segment.clone(), path));
                    tally.folders += 1;
                    current.children.len() - 1
                }
            };
            current = &mut current.children[index];
        }

        if current.children.iter().any(|c| &c.name == file_name) {
            warn!(path = %entry.path.join("/"), "Skipping duplicate entry");
            return false;
        }

        let mut path = current.path.clone();
        path.push(file_name.clone());
        current.children.push(Node::file(
            file_name.clone(),
            path,
            entry.size,
            Some(entry.source.clone()),
        ));
        true
    }
}
