// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Inclusion rules for files and folders found during a walk

use crate::error::MapError;
use regex::Regex;

/// Source extension used when none is configured
pub const DEFAULT_EXTENSION: &str = "ts";

/// Folder the tool writes its own output into
pub const DEFAULT_OUTPUT_FOLDER: &str = "codemapper";

/// Package dependency folder
pub const DEFAULT_DEPENDENCY_FOLDER: &str = "node_modules";

/// Version control metadata folders, never walked
pub const VCS_FOLDERS: &[&str] = &[".git", ".hg", ".svn"];

/// Decides which file names are source files worth mapping
#[derive(Debug, Clone)]
pub enum FileMatcher {
    /// Names ending in `.<ext>`, minus `.d` declaration and `.spec` files
    Extension(String),
    /// A caller-supplied regex that has to match the whole name
    Pattern(Regex),
}

impl FileMatcher {
    /// Default matcher for a source extension (given without the dot)
    #[must_use]
    pub fn for_extension(extension: &str) -> Self {
        Self::Extension(extension.trim_start_matches('.').to_string())
    }

    /// Matcher from a caller-supplied pattern, anchored to the whole name.
    ///
    /// The bare pattern is compiled first so that text like `a)(b` is
    /// rejected instead of becoming valid once wrapped.
    pub fn from_pattern(pattern: &str) -> Result<Self, MapError> {
        let invalid = |source| MapError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        };
        Regex::new(pattern).map_err(invalid)?;
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Self::Pattern)
            .map_err(invalid)
    }

    /// The pattern replaces the extension rule entirely when present
    pub fn new(pattern: Option<&str>, extension: &str) -> Result<Self, MapError> {
        match pattern {
            Some(p) => Self::from_pattern(p),
            None => Ok(Self::for_extension(extension)),
        }
    }

    /// Check a bare file name
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Extension(ext) => {
                let suffix = format!(".{ext}");
                let Some(stem) = name.strip_suffix(suffix.as_str()) else {
                    return false;
                };
                !stem.is_empty() && !stem.ends_with(".d") && !stem.ends_with(".spec")
            }
            Self::Pattern(re) => re.is_match(name),
        }
    }
}

/// Whether a file belongs in the map
#[must_use]
pub fn is_eligible_file(name: &str, all_files: bool, matcher: &FileMatcher) -> bool {
    all_files || matcher.matches(name)
}

/// Whether a folder should be walked, using the default folder names
#[must_use]
pub fn is_eligible_folder(name: &str, exclude_dependencies: bool) -> bool {
    FolderRules::default().is_eligible(name, exclude_dependencies)
}

/// Names of the folders a walk skips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRules {
    /// The tool's own output folder
    pub output_folder: String,
    /// Package dependency folder
    pub dependency_folder: String,
}

impl Default for FolderRules {
    fn default() -> Self {
        Self {
            output_folder: DEFAULT_OUTPUT_FOLDER.to_string(),
            dependency_folder: DEFAULT_DEPENDENCY_FOLDER.to_string(),
        }
    }
}

impl FolderRules {
    /// Check a bare folder name
    #[must_use]
    pub fn is_eligible(&self, name: &str, exclude_dependencies: bool) -> bool {
        if name == self.dependency_folder {
            return !exclude_dependencies;
        }
        !(VCS_FOLDERS.contains(&name) || name == self.output_folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matcher() {
        let m = FileMatcher::for_extension("ts");
        assert!(m.matches("foo.ts"));
        assert!(m.matches("foo.component.ts"));
        assert!(!m.matches("foo.d.ts"));
        assert!(!m.matches("foo.spec.ts"));
        assert!(!m.matches("foo.ts.map"));
        assert!(!m.matches("foo.tsx"));
        assert!(!m.matches(".ts"));
        assert!(!m.matches("readme.md"));
    }

    #[test]
    fn test_extension_with_leading_dot() {
        let m = FileMatcher::for_extension(".js");
        assert!(m.matches("index.js"));
        assert!(!m.matches("index.ts"));
    }

    #[test]
    fn test_pattern_replaces_default() {
        let m = FileMatcher::new(Some(r"[a-z]+\.spec\.ts"), "ts").unwrap();
        assert!(m.matches("foo.spec.ts"));
        assert!(!m.matches("foo.ts"));
        // Partial matches do not count
        assert!(!m.matches("Xfoo.spec.ts"));
    }

    #[test]
    fn test_pattern_alternation_matches_whole_name() {
        let m = FileMatcher::from_pattern("a|abc").unwrap();
        assert!(m.matches("abc"));
        assert!(m.matches("a"));
        assert!(!m.matches("ab"));
        assert!(FileMatcher::from_pattern("a)(b").is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FileMatcher::from_pattern("(unclosed").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Input);
    }

    #[test]
    fn test_all_files_overrides_matcher() {
        let m = FileMatcher::for_extension("ts");
        assert!(is_eligible_file("readme.md", true, &m));
        assert!(!is_eligible_file("readme.md", false, &m));
    }

    #[test]
    fn test_folders() {
        assert!(is_eligible_folder("src", true));
        assert!(!is_eligible_folder(".git", true));
        assert!(!is_eligible_folder("codemapper", true));
        assert!(!is_eligible_folder("node_modules", true));
        assert!(is_eligible_folder("node_modules", false));
        assert!(!is_eligible_folder(".git", false));
    }

    #[test]
    fn test_custom_folder_rules() {
        let rules = FolderRules {
            output_folder: "graphs".into(),
            dependency_folder: "vendor".into(),
        };
        assert!(rules.is_eligible("codemapper", true));
        assert!(!rules.is_eligible("graphs", true));
        assert!(!rules.is_eligible("vendor", true));
        assert!(rules.is_eligible("node_modules", true));
    }
}
