// src/config/model.rs

use serde::Deserialize;

use crate::matcher::PatternSet;

/// Configuration as read from a TOML file or assembled from CLI inputs,
/// before validation.
///
/// ```toml
/// paths = ["clusters/:cluster/:component/**"]
/// paths-fallback = [".github/workflows/**"]
/// outputs = [
///   "kustomization=clusters/:cluster/:component/kustomization.yaml",
/// ]
/// ```
///
/// All keys are optional here; `Config::try_from` enforces what is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    /// Patterns with `:name` variables matched against changed files.
    #[serde(default)]
    pub paths: Vec<String>,

    /// If any changed file matches one of these, every output falls back to
    /// its wildcard form.
    #[serde(default)]
    pub paths_fallback: Vec<String>,

    /// Output declarations in `NAME=TEMPLATE` form.
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl RawConfig {
    /// Overlay `other` on top of `self`: every non-empty list in `other`
    /// replaces the corresponding list here.
    pub fn overlay(mut self, other: RawConfig) -> Self {
        if !other.paths.is_empty() {
            self.paths = other.paths;
        }
        if !other.paths_fallback.is_empty() {
            self.paths_fallback = other.paths_fallback;
        }
        if !other.outputs.is_empty() {
            self.outputs = other.outputs;
        }
        self
    }
}

/// One output variable: its name and the template rendered into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub name: String,
    pub template: String,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfig>`, so holding one means all
/// patterns compiled and every output parsed.
#[derive(Debug, Clone)]
pub struct Config {
    paths: PatternSet,
    paths_fallback: PatternSet,
    outputs: Vec<OutputSpec>,
}

impl Config {
    pub(crate) fn new_unchecked(
        paths: PatternSet,
        paths_fallback: PatternSet,
        outputs: Vec<OutputSpec>,
    ) -> Self {
        Self {
            paths,
            paths_fallback,
            outputs,
        }
    }

    pub fn paths(&self) -> &PatternSet {
        &self.paths
    }

    pub fn paths_fallback(&self) -> &PatternSet {
        &self.paths_fallback
    }

    /// Output variables in declaration order.
    pub fn outputs(&self) -> &[OutputSpec] {
        &self.outputs
    }
}
