// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Directory walking - builds the folder tree and the flat path index

use crate::error::MapError;
use crate::filter::{is_eligible_file, FileMatcher, FolderRules, DEFAULT_EXTENSION};
use crate::types::{DirectoryNode, PathIndex};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Walk configuration
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Skip the package dependency folder
    pub exclude_dependencies: bool,
    /// Include every file regardless of name
    pub all_files: bool,
    /// Which file names count as source files
    pub matcher: FileMatcher,
    /// Which folder names are skipped
    pub folders: FolderRules,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            exclude_dependencies: true,
            all_files: false,
            matcher: FileMatcher::for_extension(DEFAULT_EXTENSION),
            folders: FolderRules::default(),
        }
    }
}

impl WalkOptions {
    /// Build options from the caller's flags, compiling `pattern` if given
    pub fn new(
        exclude_dependencies: bool,
        all_files: bool,
        pattern: Option<&str>,
    ) -> Result<Self, MapError> {
        Ok(Self {
            exclude_dependencies,
            all_files,
            matcher: FileMatcher::new(pattern, DEFAULT_EXTENSION)?,
            ..Self::default()
        })
    }
}

/// Result of a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Pruned folder tree rooted at the walked folder
    pub tree: DirectoryNode,
    /// Every included file, in discovery order
    pub index: PathIndex,
}

/// Entries of a single folder, split by type
#[derive(Debug, Default)]
struct Listing {
    files: Vec<String>,
    folders: Vec<String>,
}

/// Walk `root` depth first and return the pruned tree plus path index
pub fn walk(root: &Path, options: &WalkOptions) -> Result<Walk, MapError> {
    let root = resolve_root(root)?;
    info!("Building structure from: {}", root.display());

    let mut index = PathIndex::new(&root);
    let tree = walk_folder(&root, options, &mut index)?;

    info!(
        "Walk finished: {} files in {} folders",
        index.len(),
        tree.folder_count()
    );
    Ok(Walk { tree, index })
}

/// Check the root exists and is a folder, and make it absolute
fn resolve_root(root: &Path) -> Result<PathBuf, MapError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MapError::MissingInput(root.to_path_buf()))
        }
        Err(source) => {
            return Err(MapError::ReadDir {
                path: root.to_path_buf(),
                source,
            })
        }
    };

    if !metadata.is_dir() {
        return Err(MapError::NotADirectory(root.to_path_buf()));
    }

    root.canonicalize().map_err(|source| MapError::ReadDir {
        path: root.to_path_buf(),
        source,
    })
}

fn walk_folder(
    path: &Path,
    options: &WalkOptions,
    index: &mut PathIndex,
) -> Result<DirectoryNode, MapError> {
    debug!("Building structure from {}", path.display());

    let listing = list_folder(path, options)?;
    let mut node = DirectoryNode::new();

    for file in listing.files {
        index.push(path.join(&file));
        node.files.push(file);
    }

    for folder in listing.folders {
        let child = walk_folder(&path.join(&folder), options, index)?;
        if child.is_empty() {
            debug!("{} folder doesn't contain any relevant files, skipping", folder);
            continue;
        }
        node.insert_child(folder, child);
    }

    Ok(node)
}

/// List one folder, keeping eligible files and folders in listing order
fn list_folder(path: &Path, options: &WalkOptions) -> Result<Listing, MapError> {
    let mut listing = Listing::default();

    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth 0 means the folder itself could not be opened
            Err(err) if err.depth() == 0 => {
                return Err(MapError::ReadDir {
                    path: path.to_path_buf(),
                    source: err.into(),
                });
            }
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {}", path.display(), err);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if options.folders.is_eligible(&name, options.exclude_dependencies) {
                debug!("Folder is acceptable: {}", name);
                listing.folders.push(name);
            }
        } else if file_type.is_file() || readable_as_file(entry.path()) {
            if is_eligible_file(&name, options.all_files, &options.matcher) {
                debug!("File is acceptable: {}", name);
                listing.files.push(name);
            }
        } else {
            debug!("Ignoring special entry {}", entry.path().display());
        }
    }

    Ok(listing)
}

/// Symlinks and other special entries count as files only if they resolve to one
fn readable_as_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
