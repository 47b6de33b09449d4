// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Startup checks - make sure the renderer can be found before mapping

use crate::error::MapError;
use crate::render::Renderer;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// What the startup check found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererInfo {
    /// Platform name as reported to the user
    pub platform: &'static str,
    /// Renderer to use for the run
    pub renderer: Renderer,
    /// First line of the renderer's version banner
    pub version: String,
    /// Found in an install folder rather than on the path
    pub from_install_dir: bool,
}

/// Short platform name
#[must_use]
pub fn platform() -> &'static str {
    match std::env::consts::OS {
        "windows" => "windows",
        "linux" => "linux",
        "macos" => "mac",
        _ => "unknown",
    }
}

/// Check that the configured renderer runs.
///
/// On Windows a renderer missing from the path is also looked for in the
/// usual Graphviz install folders.
pub fn check_renderer(renderer: &Renderer) -> Result<RendererInfo, MapError> {
    let platform = platform();
    info!("Checking platform ({}) and looking for {}", platform, renderer.program);

    match probe(&renderer.program) {
        Ok(version) => Ok(RendererInfo {
            platform,
            renderer: renderer.clone(),
            version,
            from_install_dir: false,
        }),
        Err(err) if cfg!(windows) => {
            let found = windows_install_roots()
                .iter()
                .find_map(|root| find_graphviz_in(root))
                .ok_or(err)?;
            let program = found.to_string_lossy().into_owned();
            let version = probe(&program)?;
            info!("{} is not in the path, but was found at {}", renderer.program, program);
            Ok(RendererInfo {
                platform,
                renderer: Renderer {
                    program,
                    engine: renderer.engine.clone(),
                },
                version,
                from_install_dir: true,
            })
        }
        Err(err) => Err(err),
    }
}

/// Run `<program> -V` and return the version banner
fn probe(program: &str) -> Result<String, MapError> {
    let output = Command::new(program)
        .arg("-V")
        .output()
        .map_err(|source| MapError::RendererUnavailable {
            program: program.to_string(),
            source,
        })?;

    // Graphviz prints its banner on stderr
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    if !output.status.success() {
        return Err(MapError::RendererFailed {
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    let version = stderr
        .lines()
        .chain(stdout.lines())
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string();
    debug!("{} reports: {}", program, version);
    Ok(version)
}

/// Program Files folders to search on Windows
fn windows_install_roots() -> Vec<PathBuf> {
    ["ProgramFiles(x86)", "ProgramFiles"]
        .iter()
        .filter_map(|var| std::env::var_os(var).map(PathBuf::from))
        .chain([
            PathBuf::from("C:\\Program Files (x86)"),
            PathBuf::from("C:\\Program Files"),
        ])
        .collect()
}

/// `<root>/Graphviz*/bin/dot.exe`, if such a folder exists
fn find_graphviz_in(root: &Path) -> Option<PathBuf> {
    fs::read_dir(root)
        .ok()?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().contains("Graphviz"))
        .map(|entry| entry.path().join("bin").join("dot.exe"))
        .find(|candidate| candidate.is_file())
}
