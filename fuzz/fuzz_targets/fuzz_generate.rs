// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! DOT generation over arbitrary trees declares every file exactly once

#![no_main]

use arbitrary::Arbitrary;
use codemapper::graph::{generate, RenderOptions};
use codemapper::types::{DirectoryNode, PathIndex};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Tree {
    files: Vec<String>,
    children: Vec<(String, Tree)>,
}

fn build(tree: Tree, depth: usize) -> DirectoryNode {
    let mut node = DirectoryNode {
        files: tree.files,
        children: Vec::new(),
    };
    if depth < 4 {
        for (name, child) in tree.children {
            node.insert_child(name, build(child, depth + 1));
        }
    }
    node
}

fuzz_target!(|tree: Tree| {
    let node = build(tree, 0);
    let index = PathIndex::new("/nonexistent/fuzz");
    let graph = generate(&node, &index, &RenderOptions::default());
    assert_eq!(graph.node_count, node.file_count());
    assert_eq!(graph.edge_count, 0);
    assert!(graph.text.ends_with("}\n"));
});
