// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Check command - reports whether the renderer can be run

use crate::config::Settings;
use crate::startup::{self, platform};
use anyhow::{Context, Result};

/// Run the check command
pub fn run(settings: &Settings) -> Result<()> {
    let renderer = settings.renderer();
    let found = startup::check_renderer(&renderer).with_context(|| {
        format!(
            "You are running a {} platform, do you have graphviz installed and in the path?",
            platform()
        )
    })?;

    if found.from_install_dir {
        println!(
            "You are running {}, {} is not in the path, but the executable was found at {}",
            found.platform, renderer.program, found.renderer.program
        );
    } else {
        println!(
            "You are running {}, {} was found in the path",
            found.platform, found.renderer.program
        );
    }
    if !found.version.is_empty() {
        println!("  {}", found.version);
    }
    Ok(())
}
