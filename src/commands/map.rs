// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Map command - walks a project and renders its import graph

use crate::config::Settings;
use crate::mapper::{self, MapRequest};
use crate::render::OutputFormat;
use crate::startup;
use crate::types::Resolution;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for the map command
#[derive(Debug, Clone, Default)]
pub struct MapArgs {
    /// Folder to map
    pub path: PathBuf,
    /// Output folder override
    pub output_dir: Option<PathBuf>,
    /// Output base name override
    pub name: Option<String>,
    /// Renderer output format
    pub format: OutputFormat,
    /// Pattern replacing the default file rule
    pub regex: Option<String>,
    /// Walk the dependency folder too
    pub include_deps: bool,
    /// Map every file regardless of extension
    pub all_files: bool,
    /// Import matching override
    pub resolution: Option<Resolution>,
    /// Skip the renderer startup check
    pub skip_check: bool,
}

impl MapArgs {
    /// Turn the flags into a pipeline request
    #[must_use]
    pub fn request(&self, settings: &Settings) -> MapRequest {
        let mut request = MapRequest::new(&self.path);
        request.exclude_dependencies = !self.include_deps;
        request.all_files = self.all_files;
        request.pattern = self.regex.clone();
        request.format = self.format;
        request.output_dir = self.output_dir.clone();
        request.resolution = self.resolution.unwrap_or(settings.resolution);
        if let Some(name) = &self.name {
            request.output_name = name.clone();
        }
        request
    }
}

/// Run the map command
pub fn run(args: &MapArgs, settings: &Settings, color: bool) -> Result<()> {
    info!("Mapping: {:?}", args.path);

    let request = args.request(settings);
    let mut renderer = settings.renderer();

    if !args.skip_check && request.format != OutputFormat::Dot {
        match startup::check_renderer(&renderer) {
            Ok(found) => {
                info!("Startup checks succeeded: {} ({})", found.version, found.platform);
                renderer = found.renderer;
            }
            Err(e) => warn!(
                "Startup check failed: {}. The DOT file will still be written.",
                e
            ),
        }
    }

    let report = mapper::run(&request, settings, &renderer)
        .with_context(|| format!("An error occurred while mapping {}", args.path.display()))?;

    let done = "Mapping complete";
    if color {
        println!("{}", done.green().bold());
    } else {
        println!("{done}");
    }
    println!("  files: {}", report.files);
    println!("  imports: {}", report.edges);
    println!("  description: {}", report.description.display());
    if report.artifact != report.description {
        println!("  {}: {}", request.format, report.artifact.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_args() {
        let settings = Settings {
            resolution: Resolution::Relative,
            ..Settings::default()
        };
        let args = MapArgs {
            path: "/project".into(),
            name: Some("deps".into()),
            format: OutputFormat::Svg,
            include_deps: true,
            all_files: true,
            regex: Some(r".+\.js".into()),
            ..MapArgs::default()
        };

        let request = args.request(&settings);
        assert_eq!(request.output_name, "deps");
        assert!(!request.exclude_dependencies);
        assert!(request.all_files);
        assert_eq!(request.format, OutputFormat::Svg);
        assert_eq!(request.resolution, Resolution::Relative);
        assert_eq!(request.output_dir(&settings), PathBuf::from("/project/codemapper"));
    }

    #[test]
    fn test_resolution_flag_overrides_settings() {
        let args = MapArgs {
            path: "/project".into(),
            resolution: Some(Resolution::Relative),
            ..MapArgs::default()
        };
        let request = args.request(&Settings::default());
        assert_eq!(request.resolution, Resolution::Relative);
        assert!(request.output_name.starts_with("codemapper-"));
    }
}
