// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{Config, RawConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfig`.
///
/// This only performs TOML deserialization; it does **not** compile patterns
/// or parse outputs. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfig = toml::from_str(&contents)?;
    debug!(?path, "loaded config file");

    Ok(config)
}

/// Load the optional config file, overlay CLI-provided inputs and validate.
///
/// - With no file, `inputs` alone must be a complete configuration.
/// - Non-empty lists in `inputs` replace the file's lists.
pub fn load_and_validate(file: Option<&Path>, inputs: RawConfig) -> Result<Config> {
    let base = match file {
        Some(path) => load_from_path(path)?,
        None => RawConfig::default(),
    };
    Config::try_from(base.overlay(inputs))
}

/// Split multi-line input values into trimmed, non-empty lines.
///
/// Action inputs arrive as one newline-separated string each; repeated CLI
/// flags arrive as separate values. Both end up as one entry per line.
pub fn split_lines<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().lines())
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
