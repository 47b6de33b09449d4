// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Codemapper CLI - map the imports of a source tree

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use codemapper::commands::{self, map::MapArgs, scan::ScanArgs};
use codemapper::render::OutputFormat;
use codemapper::types::Resolution;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codemapper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "CODEMAPPER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a project and render its import graph
    Map {
        /// Path of the project to map
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Folder for the generated files (default: <path>/codemapper)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Base name of the generated files, without extension
        #[arg(short, long)]
        name: Option<String>,

        /// Output format
        #[arg(short = 't', long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,

        /// Regex selecting files to map; replaces the default rule
        #[arg(short, long)]
        regex: Option<String>,

        /// Include the dependency folder (can take a very long time)
        #[arg(long)]
        include_deps: bool,

        /// Map every file type
        #[arg(short, long)]
        all_files: bool,

        /// How import targets are matched
        #[arg(long, value_enum)]
        resolution: Option<Resolution>,

        /// Do not look for the renderer before mapping
        #[arg(long)]
        skip_check: bool,
    },

    /// Walk a project and list the files that would be mapped
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Regex selecting files; replaces the default rule
        #[arg(short, long)]
        regex: Option<String>,

        /// Include the dependency folder
        #[arg(long)]
        include_deps: bool,

        /// Include every file type
        #[arg(short, long)]
        all_files: bool,

        /// Print the folder tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the renderer is installed
    Check,

    /// Show settings, or store one in the user config file
    Config {
        /// Setting name (omit to show all)
        key: Option<String>,

        /// Value to store (omit to show)
        value: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = codemapper::config::load(cli.config.as_deref())?;
    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Map {
            path,
            output_dir,
            name,
            format,
            regex,
            include_deps,
            all_files,
            resolution,
            skip_check,
        } => {
            let args = MapArgs {
                path,
                output_dir,
                name,
                format,
                regex,
                include_deps,
                all_files,
                resolution,
                skip_check,
            };
            commands::map::run(&args, &settings, color)
        }
        Commands::Scan {
            path,
            regex,
            include_deps,
            all_files,
            json,
        } => {
            let args = ScanArgs {
                path,
                regex,
                include_deps,
                all_files,
                json,
            };
            commands::scan::run(&args, &settings)
        }
        Commands::Check => commands::check::run(&settings),
        Commands::Config { key, value } => {
            commands::config::run(&settings, key.as_deref(), value.as_deref())
        }
        Commands::Completions { shell } => commands::completions::run(shell, Cli::command()),
    }
}
