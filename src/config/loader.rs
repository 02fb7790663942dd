// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::dag::Step;
use crate::errors::Result;

/// Load a configuration file and return the raw, unvalidated `RawConfigFile`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the effective configuration.
///
/// - An explicit path must exist and be valid.
/// - Without one, `Stepdag.toml` in the working directory is used if
///   present, otherwise built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_and_validate(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                load_and_validate(&path)
            } else {
                debug!(path = %path.display(), "no config file; using defaults");
                Ok(ConfigFile::default())
            }
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("Stepdag.toml")
}

/// Recipe payload wrapped the way the recipe API returns it.
#[derive(Debug, Deserialize)]
struct WrappedRecipe {
    planned_steps: Vec<Step>,
}

/// Parse a recipe step list from JSON text.
///
/// Accepts a bare step array or `{ "planned_steps": [...] }`. The shape is
/// picked from the first non-blank character, so a bad step reports the
/// real field error with its line and column.
pub fn parse_recipe(contents: &str) -> Result<Vec<Step>> {
    if contents.trim_start().starts_with('{') {
        let wrapped: WrappedRecipe = serde_json::from_str(contents)?;
        return Ok(wrapped.planned_steps);
    }

    let steps: Vec<Step> = serde_json::from_str(contents)?;
    Ok(steps)
}

/// Read and parse a recipe file.
pub fn load_recipe(path: impl AsRef<Path>) -> Result<Vec<Step>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let steps = parse_recipe(&contents)?;
    debug!(path = %path.as_ref().display(), steps = steps.len(), "read recipe file");
    Ok(steps)
}
