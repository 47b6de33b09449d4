// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Codemapper library - a quick visual map of the imports in a source tree
//!
//! The pipeline runs one way: [`walker`] scans a folder into a
//! [`types::DirectoryNode`] tree plus a flat [`types::PathIndex`], [`graph`]
//! turns that into Graphviz DOT text (using [`imports`] to find the edges),
//! and [`render`] writes the text to disk and hands it to the renderer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod imports;
pub mod mapper;
pub mod render;
pub mod startup;
pub mod walker;

/// Core data types shared by the walker and the DOT generator
pub mod types {
    use serde::{Deserialize, Serialize};
    use std::path::{Path, PathBuf};

    // =========================================================================
    // Directory Tree
    // =========================================================================

    /// Shape of a folder level in the walked tree
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum NodeKind {
        /// Only files, no nested folders
        Leaf,
        /// At least one nested folder (and possibly files)
        Branch,
    }

    /// One folder level of the walked tree
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DirectoryNode {
        /// Included file names directly inside this folder, in listing order
        #[serde(default)]
        pub files: Vec<String>,
        /// Nested folders that kept at least one file somewhere below them
        #[serde(default)]
        pub children: Vec<Folder>,
    }

    /// A named child folder
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Folder {
        /// Folder name (unique within its parent)
        pub name: String,
        /// Contents of the folder
        pub node: DirectoryNode,
    }

    impl DirectoryNode {
        /// Create an empty folder level
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Leaf when there are no nested folders
        #[must_use]
        pub fn kind(&self) -> NodeKind {
            if self.children.is_empty() {
                NodeKind::Leaf
            } else {
                NodeKind::Branch
            }
        }

        /// True when there is nothing worth keeping at this level
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.files.is_empty() && self.children.is_empty()
        }

        /// Look up a direct child folder by name
        #[must_use]
        pub fn child(&self, name: &str) -> Option<&DirectoryNode> {
            self.children
                .iter()
                .find(|folder| folder.name == name)
                .map(|folder| &folder.node)
        }

        /// Attach a child folder, replacing any previous child of the same name
        pub fn insert_child(&mut self, name: impl Into<String>, node: DirectoryNode) {
            let name = name.into();
            if let Some(existing) = self.children.iter_mut().find(|f| f.name == name) {
                existing.node = node;
            } else {
                self.children.push(Folder { name, node });
            }
        }

        /// Number of files in this level and every level below it
        #[must_use]
        pub fn file_count(&self) -> usize {
            self.files.len()
                + self
                    .children
                    .iter()
                    .map(|folder| folder.node.file_count())
                    .sum::<usize>()
        }

        /// Number of folders below this level
        #[must_use]
        pub fn folder_count(&self) -> usize {
            self.children
                .iter()
                .map(|folder| 1 + folder.node.folder_count())
                .sum()
        }
    }

    // =========================================================================
    // Path Index
    // =========================================================================

    /// Flat list of every included file, in the order the walk found them
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    pub struct PathIndex {
        root: PathBuf,
        paths: Vec<PathBuf>,
    }

    impl PathIndex {
        /// Create an empty index for a walk rooted at `root`
        #[must_use]
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self {
                root: root.into(),
                paths: Vec::new(),
            }
        }

        /// Folder the walk started from
        #[must_use]
        pub fn root(&self) -> &Path {
            &self.root
        }

        /// Record another included file
        pub fn push(&mut self, path: impl Into<PathBuf>) {
            self.paths.push(path.into());
        }

        /// All recorded paths in walk order
        #[must_use]
        pub fn paths(&self) -> &[PathBuf] {
            &self.paths
        }

        /// Number of recorded files
        #[must_use]
        pub fn len(&self) -> usize {
            self.paths.len()
        }

        /// True when the walk included no files
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.paths.is_empty()
        }

        /// Exact membership test
        #[must_use]
        pub fn contains(&self, path: &Path) -> bool {
            self.paths.iter().any(|p| p == path)
        }

        /// Last recorded path whose text contains `needle`.
        ///
        /// Scans from the end of the index, so when several paths match the
        /// one recorded latest by the walk wins.
        #[must_use]
        pub fn find_containing(&self, needle: &str) -> Option<&Path> {
            self.paths
                .iter()
                .rev()
                .find(|p| p.to_string_lossy().contains(needle))
                .map(PathBuf::as_path)
        }
    }

    // =========================================================================
    // Import Resolution
    // =========================================================================

    /// How import targets are matched against the walked files
    #[derive(
        Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
    )]
    #[serde(rename_all = "lowercase")]
    pub enum Resolution {
        /// Any indexed path containing the target file name (latest wins)
        #[default]
        Substring,
        /// The import path joined onto the importing file's folder
        Relative,
    }

    impl std::fmt::Display for Resolution {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Substring => f.write_str("substring"),
                Self::Relative => f.write_str("relative"),
            }
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{ErrorKind, MapError};
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}

#[cfg(test)]
mod tests {
    use super::types::*;
    use std::path::Path;

    fn leaf(files: &[&str]) -> DirectoryNode {
        DirectoryNode {
            files: files.iter().map(|f| (*f).to_string()).collect(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_node_kind_and_counts() {
        let mut root = leaf(&["index.ts"]);
        assert_eq!(root.kind(), NodeKind::Leaf);

        let mut src = leaf(&["a.ts", "b.ts"]);
        src.insert_child("util", leaf(&["c.ts"]));
        root.insert_child("src", src);

        assert_eq!(root.kind(), NodeKind::Branch);
        assert_eq!(root.file_count(), 4);
        assert_eq!(root.folder_count(), 2);
        assert!(root.child("src").is_some());
        assert!(root.child("util").is_none());
    }

    #[test]
    fn test_insert_child_replaces_same_name() {
        let mut root = DirectoryNode::new();
        root.insert_child("src", leaf(&["a.ts"]));
        root.insert_child("src", leaf(&["b.ts"]));

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.child("src").map(|n| n.files.clone()), Some(vec!["b.ts".to_string()]));
    }

    #[test]
    fn test_find_containing_prefers_latest_entry() {
        let mut index = PathIndex::new("/p");
        index.push("/p/src/b.ts");
        index.push("/p/lib/ab.ts");

        assert_eq!(index.find_containing("b.ts"), Some(Path::new("/p/lib/ab.ts")));
        assert_eq!(index.find_containing("src/b.ts"), Some(Path::new("/p/src/b.ts")));
        assert_eq!(index.find_containing("zzz.ts"), None);
        assert!(index.contains(Path::new("/p/src/b.ts")));
        assert!(!index.contains(Path::new("/p/src")));
    }
}
