// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The mapping pipeline: walk, generate, persist, render

use crate::config::Settings;
use crate::error::MapError;
use crate::filter::FileMatcher;
use crate::graph::{generate, DotGraph, RenderOptions};
use crate::render::{persist_and_render, OutputFormat, Renderer};
use crate::types::Resolution;
use crate::walker::{walk, WalkOptions};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::info;

/// Default artifact base name for a given day
#[must_use]
pub fn default_output_name(date: NaiveDate) -> String {
    format!("codemapper-{}", date.format("%Y%m%d"))
}

/// One mapping run
#[derive(Debug, Clone)]
pub struct MapRequest {
    /// Folder to map
    pub root: PathBuf,
    /// Skip the package dependency folder
    pub exclude_dependencies: bool,
    /// Include every file regardless of name
    pub all_files: bool,
    /// Replaces the default file rule when set
    pub pattern: Option<String>,
    /// Base name of the written files
    pub output_name: String,
    /// Renderer output format
    pub format: OutputFormat,
    /// Where to write; defaults to the output folder inside `root`
    pub output_dir: Option<PathBuf>,
    /// Import matching mode
    pub resolution: Resolution,
}

impl MapRequest {
    /// A request with the default flags for `root`, named after today
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_dependencies: true,
            all_files: false,
            pattern: None,
            output_name: default_output_name(Local::now().date_naive()),
            format: OutputFormat::default(),
            output_dir: None,
            resolution: Resolution::default(),
        }
    }

    /// Output folder for this request
    #[must_use]
    pub fn output_dir(&self, settings: &Settings) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.root.join(&settings.output_folder))
    }

    /// Walk options for this request
    pub fn walk_options(&self, settings: &Settings) -> Result<WalkOptions, MapError> {
        Ok(WalkOptions {
            exclude_dependencies: self.exclude_dependencies,
            all_files: self.all_files,
            matcher: FileMatcher::new(self.pattern.as_deref(), &settings.extension)?,
            folders: settings.folder_rules(),
        })
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapReport {
    /// Number of files mapped
    pub files: usize,
    /// Number of import connections drawn
    pub edges: usize,
    /// The written DOT description
    pub description: PathBuf,
    /// The rendered artifact
    pub artifact: PathBuf,
}

/// Walk the project and build its DOT text without writing anything
pub fn describe(request: &MapRequest, settings: &Settings) -> Result<DotGraph, MapError> {
    let walk = walk(&request.root, &request.walk_options(settings)?)?;

    let options = RenderOptions {
        graph_name: request.output_name.clone(),
        extension: settings.extension.clone(),
        resolution: request.resolution,
    };
    let graph = generate(&walk.tree, &walk.index, &options);
    info!(
        "Generated graph with {} nodes and {} edges",
        graph.node_count, graph.edge_count
    );
    Ok(graph)
}

/// Run the whole pipeline with the given renderer
pub fn run(
    request: &MapRequest,
    settings: &Settings,
    renderer: &Renderer,
) -> Result<MapReport, MapError> {
    let graph = describe(request, settings)?;
    let output_dir = request.output_dir(settings);

    let outcome = persist_and_render(
        &graph.text,
        &output_dir,
        &request.output_name,
        request.format,
        renderer,
    )?;

    Ok(MapReport {
        files: graph.node_count,
        edges: graph.edge_count,
        description: outcome.description,
        artifact: outcome.artifact,
    })
}
