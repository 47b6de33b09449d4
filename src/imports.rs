// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Import scanning - finds the project files a source file refers to
//!
//! This is a text heuristic, not a parser. A statement counts as an import
//! when it contains the word `import` and a quoted path starting with `.`.
//! Statements that carry comment markers are dropped, but block comments
//! spanning several lines are not tracked.

use crate::types::{PathIndex, Resolution};
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

const COMMENT_MARKERS: &[&str] = &["//", "/*", "*/"];

/// A double or single quoted literal that starts with `.`
static RELATIVE_LITERAL: OnceLock<Regex> = OnceLock::new();

fn relative_literal() -> &'static Regex {
    RELATIVE_LITERAL.get_or_init(|| {
        Regex::new(r#""(\.[^"]*)"|'(\.[^']*)'"#).expect("valid regex")
    })
}

/// A relative import found in source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    /// The quoted path as written, e.g. `../util/b`
    pub specifier: String,
}

impl ImportReference {
    /// Final path segment of the import with the source extension appended.
    ///
    /// Returns `None` for imports of a bare folder (`.`, `..`, `./`).
    #[must_use]
    pub fn target_name(&self, extension: &str) -> Option<String> {
        let segment = self.specifier.rsplit('/').next().unwrap_or_default();
        if segment.is_empty() || segment == "." || segment == ".." {
            return None;
        }
        let suffix = format!(".{extension}");
        if segment.ends_with(&suffix) {
            Some(segment.to_string())
        } else {
            Some(format!("{segment}{suffix}"))
        }
    }
}

/// Collect the relative imports in a piece of source text, in order
#[must_use]
pub fn scan_source(text: &str) -> Vec<ImportReference> {
    text.lines()
        .flat_map(|line| line.split(';'))
        .filter(|unit| unit.contains("import"))
        .filter(|unit| !COMMENT_MARKERS.iter().any(|marker| unit.contains(marker)))
        .filter_map(relative_specifier)
        .map(|specifier| ImportReference { specifier })
        .collect()
}

/// First quoted literal in `unit` that starts with a `.`
fn relative_specifier(unit: &str) -> Option<String> {
    relative_literal()
        .captures(unit)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
}

/// Files in `index` that the file at `path` imports.
///
/// A file that cannot be read (or is a folder) simply has no references.
/// Each target appears once, in the order its first import was written.
#[must_use]
pub fn find_referenced_files(
    path: &Path,
    index: &PathIndex,
    resolution: Resolution,
    extension: &str,
) -> Vec<PathBuf> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!("Unable to read {} for imports: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut targets: Vec<PathBuf> = Vec::new();
    for reference in scan_source(&text) {
        let resolved = match resolution {
            Resolution::Substring => reference
                .target_name(extension)
                .and_then(|name| index.find_containing(&name))
                .map(Path::to_path_buf),
            Resolution::Relative => path
                .parent()
                .and_then(|dir| resolve_relative(dir, &reference.specifier, index, extension)),
        };

        match resolved {
            Some(target) if !targets.contains(&target) => targets.push(target),
            Some(_) => {}
            None => debug!(
                "Import {} in {} did not match a mapped file",
                reference.specifier,
                path.display()
            ),
        }
    }
    targets
}

/// Resolve an import against the importing file's folder
fn resolve_relative(
    dir: &Path,
    specifier: &str,
    index: &PathIndex,
    extension: &str,
) -> Option<PathBuf> {
    let base = normalize(&dir.join(specifier));
    let mut with_ext = base.clone().into_os_string();
    with_ext.push(format!(".{extension}"));

    let candidates = [
        base.clone(),
        PathBuf::from(with_ext),
        base.join(format!("index.{extension}")),
    ];

    candidates
        .into_iter()
        .find(|candidate| index.contains(candidate))
}

/// Lexically collapse `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
