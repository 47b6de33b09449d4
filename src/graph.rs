// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! DOT generation for the walked folder tree
//!
//! Every folder becomes a cluster, every file a node, and every resolved
//! import an edge. Node and cluster identifiers are derived from names and
//! made unique across the whole document.

use crate::filter::DEFAULT_EXTENSION;
use crate::imports::find_referenced_files;
use crate::types::{DirectoryNode, Folder, NodeKind, PathIndex, Resolution};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Edge colors, handed out in order and wrapping around
pub const PALETTE: &[&str] = &[
    "red",
    "orange",
    "darkgreen",
    "blue",
    "purple",
    "chocolate2",
    "gold",
    "black",
    "deeppink2",
    "firebrick2",
    "limegreen",
    "yellow",
    "turquoise1",
];

const INDENT: &str = "  ";

/// Characters dropped from names when deriving identifiers
pub const STRIPPED_CHARS: [char; 4] = ['.', '-', '_', '@'];

/// Drop `.`, `-`, `_` and `@` from a name; everything else is kept and quoted
#[must_use]
pub fn sanitize_identifier(name: &str) -> String {
    name.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}

/// Escape a string for use inside a quoted DOT id or label
fn quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Round-robin color picker scoped to one document.
///
/// The generator asks for a color only when it writes an edge statement, so
/// files without resolved imports do not use up a color. Consecutive edge
/// statements always get consecutive palette entries.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: &'static [&'static str],
    next: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: PALETTE,
            next: 0,
        }
    }
}

impl Palette {
    /// Cycle through `colors`, starting from the first; `None` when empty
    #[must_use]
    pub fn new(colors: &'static [&'static str]) -> Option<Self> {
        if colors.is_empty() {
            return None;
        }
        Some(Self { colors, next: 0 })
    }

    /// The next color, wrapping to the first after the last
    pub fn next_color(&mut self) -> &'static str {
        let color = self.colors[self.next];
        self.next = (self.next + 1) % self.colors.len();
        color
    }
}

/// Hands out document-unique identifiers.
///
/// The first claim of a name gets it as is; the n-th repeat gets `n` appended
/// (`abts`, `abts2`, `abts3`). A suffixed form that is already taken is
/// skipped.
#[derive(Debug, Default)]
struct Identifiers {
    declared: HashSet<String>,
    occurrences: HashMap<String, usize>,
}

impl Identifiers {
    fn claim(&mut self, base: &str) -> String {
        let seen = self.occurrences.entry(base.to_string()).or_insert(0);
        let mut candidate = if *seen == 0 {
            base.to_string()
        } else {
            format!("{base}{}", *seen + 1)
        };
        *seen += 1;

        while self.declared.contains(&candidate) {
            *seen += 1;
            candidate = format!("{base}{}", *seen);
        }

        self.declared.insert(candidate.clone());
        candidate
    }
}

/// Settings for one document
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Graph name written in the header
    pub graph_name: String,
    /// Source extension (without the dot)
    pub extension: String,
    /// How import targets are matched
    pub resolution: Resolution,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            graph_name: "codemapper".to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            resolution: Resolution::default(),
        }
    }
}

/// A finished document plus counts for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotGraph {
    /// Complete DOT text
    pub text: String,
    /// Number of file nodes declared
    pub node_count: usize,
    /// Number of import connections drawn
    pub edge_count: usize,
}

/// Render the tree as DOT text
#[must_use]
pub fn render(tree: &DirectoryNode, index: &PathIndex, options: &RenderOptions) -> String {
    generate(tree, index, options).text
}

/// Render the tree as DOT text and report what went into it
#[must_use]
pub fn generate(tree: &DirectoryNode, index: &PathIndex, options: &RenderOptions) -> DotGraph {
    let mut builder = DotBuilder::new(index, options);

    builder.header();
    builder.level(tree, index.root(), 0);
    builder.edges();
    builder.out.push_str("}\n");

    DotGraph {
        text: builder.out,
        node_count: builder.files.len(),
        edge_count: builder.edge_count,
    }
}

/// A declared file node
struct FileNode {
    id: String,
    path: PathBuf,
}

/// Accumulates one document; never reused across runs
struct DotBuilder<'a> {
    index: &'a PathIndex,
    options: &'a RenderOptions,
    out: String,
    ids: Identifiers,
    palette: Palette,
    files: Vec<FileNode>,
    ids_by_path: HashMap<PathBuf, String>,
    edge_count: usize,
}

impl<'a> DotBuilder<'a> {
    fn new(index: &'a PathIndex, options: &'a RenderOptions) -> Self {
        Self {
            index,
            options,
            out: String::new(),
            ids: Identifiers::default(),
            palette: Palette::default(),
            files: Vec::new(),
            ids_by_path: HashMap::new(),
            edge_count: 0,
        }
    }

    fn header(&mut self) {
        let _ = writeln!(self.out, "digraph \"{}\" {{", quote(&self.options.graph_name));
        let _ = writeln!(self.out, "{INDENT}splines=\"curved\";");
        let _ = writeln!(self.out, "{INDENT}node [nodesep=1000.0];");
        let _ = writeln!(self.out, "{INDENT}graph [overlap=scalexy; splines=true];");
    }

    /// Clusters for the sub-folders, then nodes for this level's files.
    /// Both are walked in reverse to keep the established layout.
    fn level(&mut self, node: &DirectoryNode, dir: &Path, depth: usize) {
        match node.kind() {
            NodeKind::Leaf => {}
            NodeKind::Branch => {
                for folder in node.children.iter().rev() {
                    self.cluster(folder, dir, depth);
                }
            }
        }
        for file in node.files.iter().rev() {
            self.file(file, dir, depth);
        }
    }

    fn cluster(&mut self, folder: &Folder, dir: &Path, depth: usize) {
        let id = self
            .ids
            .claim(&format!("cluster{}", sanitize_identifier(&folder.name)));
        let indent = INDENT.repeat(depth + 1);
        let inner = INDENT.repeat(depth + 2);

        let _ = writeln!(self.out, "{indent}subgraph \"{}\" {{", quote(&id));
        let _ = writeln!(
            self.out,
            "{inner}node [style=\"filled,rounded\", fillcolor=deepskyblue, shape=box];"
        );
        self.level(&folder.node, &dir.join(&folder.name), depth + 1);
        let _ = writeln!(self.out, "{inner}label=\"{}\";", quote(&folder.name));
        let _ = writeln!(self.out, "{inner}style=rounded;");
        let _ = writeln!(self.out, "{indent}}}");
    }

    fn file(&mut self, name: &str, dir: &Path, depth: usize) {
        let mut base = sanitize_identifier(name);
        if base.is_empty() {
            base.push_str("node");
        }
        let id = self.ids.claim(&base);
        let indent = INDENT.repeat(depth + 1);

        let _ = writeln!(
            self.out,
            "{indent}\"{}\" [label=\"{}\"];",
            quote(&id),
            quote(name)
        );

        let path = dir.join(name);
        self.ids_by_path.insert(path.clone(), id.clone());
        self.files.push(FileNode { id, path });
    }

    /// One edge statement per file that imports something; each statement
    /// takes the next palette color
    fn edges(&mut self) {
        for file in &self.files {
            let targets: Vec<&String> = find_referenced_files(
                &file.path,
                self.index,
                self.options.resolution,
                &self.options.extension,
            )
            .iter()
            .filter_map(|target| self.ids_by_path.get(target))
            .collect();

            if targets.is_empty() {
                continue;
            }

            debug!("{} imports {} mapped files", file.path.display(), targets.len());
            let list = targets
                .iter()
                .map(|id| format!("\"{}\"", quote(id)))
                .collect::<Vec<_>>()
                .join(" ");
            let color = self.palette.next_color();
            let _ = writeln!(
                self.out,
                "{INDENT}\"{}\" -> {{ {list} }} [color={color}];",
                quote(&file.id)
            );
            self.edge_count += targets.len();
        }
    }
}
