// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Scan command - walks a project and prints what would be mapped

use crate::config::Settings;
use crate::filter::FileMatcher;
use crate::types::DirectoryNode;
use crate::walker::{walk, WalkOptions};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the scan command
#[derive(Debug, Clone, Default)]
pub struct ScanArgs {
    /// Folder to scan
    pub path: PathBuf,
    /// Pattern replacing the default file rule
    pub regex: Option<String>,
    /// Walk the dependency folder too
    pub include_deps: bool,
    /// Include every file regardless of extension
    pub all_files: bool,
    /// Print the tree as JSON
    pub json: bool,
}

/// Run the scan command
pub fn run(args: &ScanArgs, settings: &Settings) -> Result<()> {
    info!("Scanning: {:?}", args.path);

    let options = WalkOptions {
        exclude_dependencies: !args.include_deps,
        all_files: args.all_files,
        matcher: FileMatcher::new(args.regex.as_deref(), &settings.extension)?,
        folders: settings.folder_rules(),
    };

    let result = walk(&args.path, &options)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&result.tree).context("Failed to serialize tree")?;
        println!("{json}");
        return Ok(());
    }

    if result.index.is_empty() {
        println!("No matching files found in {}", args.path.display());
        return Ok(());
    }

    println!(
        "Found {} files in {} folders:",
        result.tree.file_count(),
        result.tree.folder_count()
    );
    println!();
    print!("{}", outline(&result.tree));

    Ok(())
}

/// Indented listing of the tree, folders first
#[must_use]
pub fn outline(tree: &DirectoryNode) -> String {
    let mut out = String::new();
    write_level(&mut out, tree, 1);
    out
}

fn write_level(out: &mut String, node: &DirectoryNode, depth: usize) {
    let indent = "  ".repeat(depth);
    for folder in &node.children {
        let _ = writeln!(out, "{indent}{}/", folder.name);
        write_level(out, &folder.node, depth + 1);
    }
    for file in &node.files {
        let _ = writeln!(out, "{indent}{file}");
    }
}
