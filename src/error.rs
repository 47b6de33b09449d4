// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for the mapping pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad failure classes reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input path or pattern
    Input,
    /// Filesystem read or write failure
    Io,
    /// The renderer is missing or complained
    ExternalTool,
}

/// Everything that can abort a mapping run
#[derive(Debug, Error)]
pub enum MapError {
    /// Root path does not exist
    #[error("input path {} does not exist", .0.display())]
    MissingInput(PathBuf),

    /// Root path exists but is not a folder
    #[error("input path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Caller-supplied file pattern does not compile
    #[error("invalid file pattern `{pattern}`")]
    InvalidPattern {
        /// Pattern as given
        pattern: String,
        /// Compile error
        #[source]
        source: regex::Error,
    },

    /// A folder could not be listed during the walk
    #[error("failed to read directory {}", path.display())]
    ReadDir {
        /// Folder being listed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The output folder could not be created
    #[error("unable to create output directory {}", path.display())]
    CreateOutputDir {
        /// Folder that was requested
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The DOT description could not be written
    #[error("failed to write {}", path.display())]
    WriteDescription {
        /// File that was being written
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The renderer process could not be started
    #[error("renderer `{program}` could not be started; is graphviz installed and in the path?")]
    RendererUnavailable {
        /// Program that was launched
        program: String,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The renderer exited unsuccessfully
    #[error("renderer exited with {status}: {stderr}")]
    RendererFailed {
        /// Exit status description
        status: String,
        /// Captured error stream
        stderr: String,
    },

    /// The renderer exited cleanly but wrote to its error stream
    #[error("renderer reported: {0}")]
    RendererDiagnostics(String),
}

impl MapError {
    /// Which class of failure this is
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput(_) | Self::NotADirectory(_) | Self::InvalidPattern { .. } => {
                ErrorKind::Input
            }
            Self::ReadDir { .. } | Self::CreateOutputDir { .. } | Self::WriteDescription { .. } => {
                ErrorKind::Io
            }
            Self::RendererUnavailable { .. }
            | Self::RendererFailed { .. }
            | Self::RendererDiagnostics(_) => ErrorKind::ExternalTool,
        }
    }
}
