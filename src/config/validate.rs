// src/config/validate.rs

use crate::config::model::{Config, OutputSpec, RawConfig};
use crate::errors::{ChangedPathsError, Result};
use crate::matcher::PatternSet;

impl TryFrom<RawConfig> for Config {
    type Error = ChangedPathsError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, Self::Error> {
        ensure_has_paths(&raw)?;
        let outputs = parse_outputs(&raw.outputs)?;
        let paths = PatternSet::compile(&raw.paths)?;
        let paths_fallback = PatternSet::compile(&raw.paths_fallback)?;
        Ok(Config::new_unchecked(paths, paths_fallback, outputs))
    }
}

fn ensure_has_paths(cfg: &RawConfig) -> Result<()> {
    if cfg.paths.is_empty() {
        return Err(ChangedPathsError::ConfigError(
            "at least one entry in `paths` is required".to_string(),
        ));
    }
    Ok(())
}

/// Parse a single `NAME=TEMPLATE` line. Only the first `=` separates.
pub fn parse_output(line: &str) -> Result<OutputSpec> {
    let Some((name, template)) = line.split_once('=') else {
        return Err(ChangedPathsError::ConfigError(format!(
            "outputs must be in form of NAME=PATTERN but was {line}"
        )));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ChangedPathsError::ConfigError(format!(
            "output name must not be empty in {line}"
        )));
    }
    Ok(OutputSpec {
        name: name.to_string(),
        template: template.trim().to_string(),
    })
}

/// Parse all output lines, preserving declaration order.
///
/// A repeated name keeps its first position but takes the later template.
pub fn parse_outputs(lines: &[String]) -> Result<Vec<OutputSpec>> {
    if lines.is_empty() {
        return Err(ChangedPathsError::ConfigError(
            "at least one entry in `outputs` is required".to_string(),
        ));
    }

    let mut outputs: Vec<OutputSpec> = Vec::with_capacity(lines.len());
    for line in lines {
        let spec = parse_output(line)?;
        match outputs.iter_mut().find(|o| o.name == spec.name) {
            Some(existing) => existing.template = spec.template,
            None => outputs.push(spec),
        }
    }
    Ok(outputs)
}
