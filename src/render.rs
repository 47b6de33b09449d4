// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Writing the DOT description and running the renderer over it

use crate::error::MapError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;
use tracing::{debug, info};

/// File extension of the written description
pub const DESCRIPTION_EXTENSION: &str = "dot";

/// Supported renderer output formats
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PNG raster image
    #[default]
    Png,
    /// JPEG raster image
    Jpeg,
    /// Photoshop layered image
    Psd,
    /// SVG vector image
    Svg,
    /// PDF document
    Pdf,
    /// Graphviz plain text layout
    Plain,
    /// Graphviz JSON layout
    Json,
    /// The DOT description itself
    Dot,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "psd" => Ok(Self::Psd),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "plain" | "text" | "txt" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "dot" | "gv" | "graphviz" => Ok(Self::Dot),
            other => Err(format!(
                "Unknown output format: {other}. Supported: png, jpeg, psd, svg, pdf, plain, json, dot"
            )),
        }
    }
}

impl OutputFormat {
    /// File extension of the rendered artifact (also the `-T` value)
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Psd => "psd",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Plain => "plain",
            Self::Json => "json",
            Self::Dot => "dot",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// How to invoke the external renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    /// Program name or path
    pub program: String,
    /// Layout engine passed as `-K`
    pub engine: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            program: "dot".to_string(),
            engine: "fdp".to_string(),
        }
    }
}

impl Renderer {
    /// Command that renders `input` into `output`
    #[must_use]
    pub fn command(&self, format: OutputFormat, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(format!("-T{}", format.extension()))
            .arg(input)
            .arg("-o")
            .arg(output)
            .arg(format!("-K{}", self.engine));
        command
    }
}

/// Files produced by a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    /// The written DOT description
    pub description: PathBuf,
    /// The requested artifact (the description itself for `dot`)
    pub artifact: PathBuf,
    /// Whether the renderer was run
    pub rendered: bool,
    /// Whatever the renderer printed on its standard stream
    pub stdout: String,
}

/// Write `text` into `output_dir` and render it in `format`.
///
/// The description file stays on disk whatever the renderer does.
pub fn persist_and_render(
    text: &str,
    output_dir: &Path,
    base_name: &str,
    format: OutputFormat,
    renderer: &Renderer,
) -> Result<RenderOutcome, MapError> {
    fs::create_dir_all(output_dir).map_err(|source| MapError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let description = output_dir.join(format!("{base_name}.{DESCRIPTION_EXTENSION}"));
    fs::write(&description, text).map_err(|source| MapError::WriteDescription {
        path: description.clone(),
        source,
    })?;
    info!("Wrote {}", description.display());

    if format == OutputFormat::Dot {
        return Ok(RenderOutcome {
            artifact: description.clone(),
            description,
            rendered: false,
            stdout: String::new(),
        });
    }

    let artifact = output_dir.join(format!("{base_name}.{}", format.extension()));
    let mut command = renderer.command(format, &description, &artifact);
    debug!("Running {:?}", command);

    let output = command
        .output()
        .map_err(|source| MapError::RendererUnavailable {
            program: renderer.program.clone(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !output.status.success() {
        return Err(MapError::RendererFailed {
            status: output.status.to_string(),
            stderr,
        });
    }
    if !stderr.is_empty() {
        return Err(MapError::RendererDiagnostics(stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        info!("{}", stdout);
    }

    info!("Rendered {}", artifact.display());
    Ok(RenderOutcome {
        description,
        artifact,
        rendered: true,
        stdout,
    })
}
