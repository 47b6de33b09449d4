// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Property tests for name handling and import scanning

use codemapper::filter::{is_eligible_file, is_eligible_folder, FileMatcher};
use codemapper::graph::{generate, sanitize_identifier, RenderOptions, STRIPPED_CHARS};
use codemapper::imports::scan_source;
use codemapper::types::{DirectoryNode, PathIndex};
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn sanitize_drops_only_the_stripped_characters(name in ".*") {
        let id = sanitize_identifier(&name);
        prop_assert!(!id.chars().any(|c| STRIPPED_CHARS.contains(&c)));
        let kept: String = name.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
        prop_assert_eq!(id, kept);
    }

    #[test]
    fn sanitize_is_idempotent(name in ".*") {
        let once = sanitize_identifier(&name);
        prop_assert_eq!(sanitize_identifier(&once), once);
    }

    #[test]
    fn all_files_accepts_every_name(name in ".*") {
        let matcher = FileMatcher::for_extension("ts");
        prop_assert!(is_eligible_file(&name, true, &matcher));
    }

    #[test]
    fn default_rule_needs_the_extension(stem in "[a-z][a-z0-9_-]{0,12}", ext in "[a-z]{1,4}") {
        let matcher = FileMatcher::for_extension("ts");
        let name = format!("{stem}.{ext}");
        prop_assert_eq!(matcher.matches(&name), ext == "ts");
    }

    #[test]
    fn dependency_folder_follows_the_flag(exclude in any::<bool>()) {
        prop_assert_eq!(is_eligible_folder("node_modules", exclude), !exclude);
        prop_assert!(!is_eligible_folder(".git", exclude));
        prop_assert!(!is_eligible_folder("codemapper", exclude));
        prop_assert!(is_eligible_folder("src", exclude));
    }

    #[test]
    fn scanned_specifiers_are_relative(text in "[ -~\n]{0,200}") {
        for reference in scan_source(&text) {
            prop_assert!(reference.specifier.starts_with('.'));
        }
    }

    #[test]
    fn declared_identifiers_are_unique(names in prop::collection::vec("[a-c_.-]{1,4}\\.ts", 1..20)) {
        let mut seen = HashSet::new();
        let files: Vec<String> = names.into_iter().filter(|n| seen.insert(n.clone())).collect();
        let tree = DirectoryNode { files: files.clone(), children: Vec::new() };
        let index = PathIndex::new("/nonexistent/project");

        let graph = generate(&tree, &index, &RenderOptions::default());
        let declared: Vec<&str> = graph
            .text
            .lines()
            .filter(|line| line.contains("[label="))
            .filter_map(|line| line.trim().split('"').nth(1))
            .collect();
        let unique: HashSet<&str> = declared.iter().copied().collect();

        prop_assert_eq!(declared.len(), files.len());
        prop_assert_eq!(unique.len(), declared.len());
        prop_assert_eq!(graph.node_count, files.len());
    }
}
