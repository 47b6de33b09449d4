// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::filter::{
    FolderRules, DEFAULT_DEPENDENCY_FOLDER, DEFAULT_EXTENSION, DEFAULT_OUTPUT_FOLDER,
};
use crate::render::Renderer;
use crate::types::Resolution;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables that override settings
pub const ENV_PREFIX: &str = "CODEMAPPER";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Source file extension, without the dot
    pub extension: String,
    /// Renderer program name or path
    pub renderer: String,
    /// Graphviz layout engine
    pub layout_engine: String,
    /// Name of the default output folder inside the mapped project
    pub output_folder: String,
    /// Name of the package dependency folder
    pub dependency_folder: String,
    /// How import targets are matched
    pub resolution: Resolution,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            renderer: "dot".to_string(),
            layout_engine: "fdp".to_string(),
            output_folder: DEFAULT_OUTPUT_FOLDER.to_string(),
            dependency_folder: DEFAULT_DEPENDENCY_FOLDER.to_string(),
            resolution: Resolution::default(),
        }
    }
}

impl Settings {
    /// Renderer invocation described by these settings
    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer {
            program: self.renderer.clone(),
            engine: self.layout_engine.clone(),
        }
    }

    /// Folder names skipped by walks
    #[must_use]
    pub fn folder_rules(&self) -> FolderRules {
        FolderRules {
            output_folder: self.output_folder.clone(),
            dependency_folder: self.dependency_folder.clone(),
        }
    }
}

/// Per-user config file location
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "hyperpolymath", "codemapper")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration: defaults, then the user file, then `explicit`, then
/// `CODEMAPPER_*` environment variables
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut builder = ::config::Config::builder();

    if let Some(path) = user_config_path() {
        builder = builder.add_source(::config::File::from(path).required(false));
    }

    if let Some(path) = explicit {
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        builder = builder.add_source(::config::File::from(path.to_path_buf()).required(true));
    }

    builder
        .add_source(::config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}
