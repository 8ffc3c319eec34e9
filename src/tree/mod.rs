//! Folder/file tree: node model, ordering, construction and directory discovery.

pub mod builder;
pub mod collate;
pub mod node;
pub mod walker;

pub use builder::{BuiltTree, TreeBuilder, TreeTally};
pub use node::Node;
