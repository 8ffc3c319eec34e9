//! Folder/file node representation and sibling ordering

use crate::format::FileClass;
use crate::source::ByteSource;
use crate::tree::collate::compare_names;
use crate::types::{NodeKind, NodePath, WordCount};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// A folder or file in the ingested tree.
///
/// `size_bytes` and `class` are set on files only. A folder's `word_count` stays
/// [`WordCount::Pending`] until aggregation sums its children.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub path: NodePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<FileClass>,
    #[serde(skip_serializing_if = "WordCount::is_omitted")]
    pub word_count: WordCount,
    pub children: Vec<Node>,
    #[serde(skip)]
    pub(crate) source: Option<Arc<dyn ByteSource>>,
}

impl Node {
    pub fn folder(name: impl Into<String>, path: NodePath) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            path,
            size_bytes: None,
            class: None,
            word_count: WordCount::Pending,
            children: Vec::new(),
            source: None,
        }
    }

    /// A file node; ineligible formats get [`WordCount::Ineligible`] up front.
    pub fn file(
        name: impl Into<String>,
        path: NodePath,
        size: u64,
        source: Option<Arc<dyn ByteSource>>,
    ) -> Self {
        let name = name.into();
        let class = FileClass::of_name(&name);
        let word_count = if class.is_countable() {
            WordCount::Pending
        } else {
            WordCount::Ineligible
        };
        Self {
            name,
            kind: NodeKind::File,
            path,
            size_bytes: Some(size),
            class: Some(class),
            word_count,
            children: Vec::new(),
            source,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Look a node up by path relative to this one.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        let mut current = self;
        for segment in path {
            current = current.child(segment.as_ref())?;
        }
        Some(current)
    }

    /// Sort children recursively: folders first, then by collated name.
    pub fn sort_recursive(&mut self) {
        self.children.sort_by(sibling_order);
        for child in &mut self.children {
            child.sort_recursive();
        }
    }

    /// Depth-first pre-order traversal including `self`.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    pub fn file_count(&self) -> u64 {
        self.iter().filter(|n| n.is_file()).count() as u64
    }

    /// Folders including `self` when it is one.
    pub fn folder_count(&self) -> u64 {
        self.iter().filter(|n| n.is_folder()).count() as u64
    }

    pub fn total_size(&self) -> u64 {
        self.iter().filter_map(|n| n.size_bytes).sum()
    }

    /// True when every folder below (and including) this node has been aggregated.
    pub fn is_aggregated(&self) -> bool {
        self.iter()
            .filter(|n| n.is_folder())
            .all(|n| n.word_count.is_resolved())
    }
}

/// Ordering between siblings: folder before file, then name.
pub fn sibling_order(a: &Node, b: &Node) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Pre-order iterator over a subtree.
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
