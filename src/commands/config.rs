// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - shows settings or stores one in the user config file

use crate::config::{user_config_path, Settings};
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::Path;

/// Run config command: no key prints everything, a key prints one value,
/// a key and value stores it
pub fn run(settings: &Settings, key: Option<&str>, value: Option<&str>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
            print!("{text}");
        }
        (Some(key), None) => println!("{}", get(settings, key)?),
        (Some(key), Some(value)) => {
            let path = user_config_path()
                .ok_or_else(|| anyhow!("Unable to determine the user config directory"))?;
            set_in(&path, key, value)?;
            println!("Set {} = {} in {}", key, value, path.display());
        }
    }
    Ok(())
}

/// Settings as a TOML table
fn as_table(settings: &Settings) -> Result<toml::Table> {
    match toml::Value::try_from(settings).context("Failed to serialize settings")? {
        toml::Value::Table(table) => Ok(table),
        other => bail!("Settings serialized to {} instead of a table", other.type_str()),
    }
}

/// Names of all settings
fn keys() -> Result<Vec<String>> {
    Ok(as_table(&Settings::default())?.keys().cloned().collect())
}

/// Read a single setting as text
pub fn get(settings: &Settings, key: &str) -> Result<String> {
    let table = as_table(settings)?;
    match table.get(key) {
        Some(toml::Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => bail!("Unknown setting: {}. Valid: {}", key, keys()?.join(", ")),
    }
}

/// Store a setting in the config file at `path`, creating it if needed
pub fn set_in(path: &Path, key: &str, value: &str) -> Result<()> {
    if !keys()?.iter().any(|k| k == key) {
        bail!("Unknown setting: {}. Valid: {}", key, keys()?.join(", "));
    }

    let mut table: toml::Table = if path.exists() {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .parse()
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        toml::Table::new()
    };

    table.insert(key.to_string(), toml::Value::String(value.to_string()));

    toml::Value::Table(table.clone())
        .try_into::<Settings>()
        .with_context(|| format!("Invalid value for {key}: {value}"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(&table).context("Failed to serialize config")?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get() {
        let settings = Settings::default();
        assert_eq!(get(&settings, "renderer").unwrap(), "dot");
        assert_eq!(get(&settings, "resolution").unwrap(), "substring");
        assert!(get(&settings, "colour").is_err());
    }

    #[test]
    fn test_set_creates_and_updates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        set_in(&path, "extension", "js").unwrap();
        set_in(&path, "layout_engine", "neato").unwrap();

        let stored = crate::config::load(Some(&path)).unwrap();
        assert_eq!(stored.extension, "js");
        assert_eq!(stored.layout_engine, "neato");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(set_in(&path, "nope", "x").is_err());
        assert!(set_in(&path, "resolution", "fuzzy").is_err());
        assert!(!path.exists());
    }
}
