// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every input can also come from the environment, so the binary runs
//! unchanged as a GitHub Actions step: action inputs arrive as `INPUT_*`
//! variables and the runner provides the `GITHUB_*` ones.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{split_lines, RawConfig};
use crate::github::DEFAULT_API_URL;

/// Command-line arguments for `changed-paths`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "changed-paths",
    version,
    about = "Resolve output paths from the files changed in a pull request.",
    long_about = None
)]
pub struct CliArgs {
    /// Optional TOML config file with `paths`, `paths-fallback`, `outputs`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path patterns with `:name` variables. Repeatable; newline-separated
    /// values are split.
    #[arg(long = "paths", value_name = "PATTERN", env = "INPUT_PATHS")]
    pub paths: Vec<String>,

    /// Patterns that force wildcard outputs when any changed file matches.
    #[arg(long = "paths-fallback", value_name = "PATTERN", env = "INPUT_PATHS-FALLBACK")]
    pub paths_fallback: Vec<String>,

    /// Outputs in `NAME=TEMPLATE` form.
    #[arg(long = "outputs", value_name = "NAME=TEMPLATE", env = "INPUT_OUTPUTS")]
    pub outputs: Vec<String>,

    /// Token used to list pull request files.
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,

    /// Name of the triggering event.
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event_name: String,

    /// JSON file holding the event payload.
    #[arg(long, value_name = "PATH", env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File that receives outputs; stdout is used when unset.
    #[arg(long, value_name = "PATH", env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHANGED_PATHS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the wildcard outputs, but don't call the API.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Inputs given on the command line or through `INPUT_*` variables.
    pub fn raw_config(&self) -> RawConfig {
        RawConfig {
            paths: split_lines(&self.paths),
            paths_fallback: split_lines(&self.paths_fallback),
            outputs: split_lines(&self.outputs),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
