// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the codemapper CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a codemapper command isolated from the user's own config
fn codemapper(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("codemapper").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("CODEMAPPER_CONFIG")
        .env_remove("CODEMAPPER_RENDERER")
        .env_remove("CODEMAPPER_EXTENSION")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// A small TypeScript project: src/a.ts imports ./b, plus an empty folder
fn make_project(dir: &Path) {
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::create_dir_all(dir.join("empty")).unwrap();
    fs::create_dir_all(dir.join("node_modules/lib")).unwrap();
    fs::write(dir.join("src/a.ts"), "import { b } from \"./b\";\n").unwrap();
    fs::write(dir.join("src/b.ts"), "export const b = 1;\n").unwrap();
    fs::write(dir.join("node_modules/lib/index.ts"), "export {};\n").unwrap();
}

#[test]
fn test_map_dot_format() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    make_project(project.path());

    codemapper(&home)
        .args(["map", "--format", "dot", "--name", "deps"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Mapping complete"))
        .stdout(predicate::str::contains("files: 2"))
        .stdout(predicate::str::contains("imports: 1"));

    let dot = fs::read_to_string(project.path().join("codemapper/deps.dot")).unwrap();
    assert!(dot.starts_with("digraph \"deps\" {"));
    assert!(dot.contains("subgraph \"clustersrc\""));
    assert!(!dot.contains("clusterempty"));
    assert!(!dot.contains("node_modules"));
    assert!(dot.contains("\"ats\" -> { \"bts\" } [color=red];"));
}

#[test]
fn test_map_custom_output_dir() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    make_project(project.path());

    codemapper(&home)
        .args(["map", "-t", "dot", "-n", "graph", "-o"])
        .arg(out.path())
        .arg(project.path())
        .assert()
        .success();

    assert!(out.path().join("graph.dot").is_file());
    assert!(!project.path().join("codemapper").exists());
}

#[test]
fn test_map_include_deps() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    make_project(project.path());

    codemapper(&home)
        .args(["map", "-t", "dot", "-n", "all", "--include-deps"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("files: 3"));

    let dot = fs::read_to_string(project.path().join("codemapper/all.dot")).unwrap();
    assert!(dot.contains("clusternodemodules"));
}

#[test]
fn test_map_missing_path_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    codemapper(&home)
        .args(["map", "-t", "dot"])
        .arg(project.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("An error occurred while mapping"));
}

#[test]
fn test_map_bad_regex_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    make_project(project.path());

    codemapper(&home)
        .args(["map", "-t", "dot", "--regex", "(["])
        .arg(project.path())
        .assert()
        .failure();
}

#[test]
fn test_map_missing_renderer_keeps_description() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    make_project(project.path());

    codemapper(&home)
        .env("CODEMAPPER_RENDERER", "/nonexistent/graphviz/dot")
        .args(["map", "--skip-check", "-n", "deps"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("graphviz"));

    assert!(project.path().join("codemapper/deps.dot").is_file());
    assert!(!project.path().join("codemapper/deps.png").exists());
}

#[test]
fn test_scan_outline() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    make_project(project.path());

    codemapper(&home)
        .arg("scan")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files in 1 folders"))
        .stdout(predicate::str::contains("  src/\n"))
        .stdout(predicate::str::contains("    a.ts\n"))
        .stdout(predicate::str::contains("    b.ts\n"));
}

#[test]
fn test_scan_json() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    make_project(project.path());

    let output = codemapper(&home)
        .args(["scan", "--json"])
        .arg(project.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["children"][0]["name"], "src");
    assert_eq!(
        tree["children"][0]["node"]["files"].as_array().unwrap().len(),
        2
    );
    assert_eq!(tree["files"].as_array().unwrap().len(), 0);
}

#[test]
fn test_config_show_and_set() {
    let home = TempDir::new().unwrap();
    let explicit = home.path().join("codemapper.toml");
    fs::write(&explicit, "extension = \"js\"\n").unwrap();

    codemapper(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("renderer = \"dot\""))
        .stdout(predicate::str::contains("layout_engine = \"fdp\""));

    codemapper(&home)
        .args(["config", "extension", "--config"])
        .arg(&explicit)
        .assert()
        .success()
        .stdout("js\n");

    codemapper(&home)
        .env("CODEMAPPER_LAYOUT_ENGINE", "neato")
        .args(["config", "layout_engine"])
        .assert()
        .success()
        .stdout("neato\n");

    codemapper(&home)
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_missing_explicit_file() {
    let home = TempDir::new().unwrap();

    codemapper(&home)
        .args(["--config", "/nonexistent/codemapper.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    codemapper(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("codemapper"));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();

    codemapper(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("map"))
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("check"));
}
