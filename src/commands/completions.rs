// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Completions command - prints a shell completion script

use anyhow::Result;
use clap_complete::Shell;
use std::io::Write;

/// Write completions for `command` to stdout
pub fn run(shell: Shell, mut command: clap::Command) -> Result<()> {
    let name = command.get_name().to_string();
    let mut stdout = std::io::stdout().lock();
    clap_complete::generate(shell, &mut command, name, &mut stdout);
    stdout.flush()?;
    Ok(())
}
