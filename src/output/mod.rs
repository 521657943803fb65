// src/output/mod.rs

//! Emitting resolved outputs back to the CI environment.
//!
//! - `GithubOutputEmitter` appends to the file named by `GITHUB_OUTPUT`.
//! - `StdoutEmitter` prints `name=value` blocks, for local runs.
//!
//! Both echo each value inside a `::group::` block so the workflow log shows
//! what was set.

use std::fmt::Debug;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::engine::Outputs;
use crate::errors::Result;

/// Trait abstracting where resolved outputs end up.
pub trait OutputEmitter: Debug {
    fn emit(&mut self, outputs: &Outputs) -> Result<()>;
}

/// Writes outputs using the Actions `GITHUB_OUTPUT` file protocol.
#[derive(Debug, Clone)]
pub struct GithubOutputEmitter {
    path: PathBuf,
}

impl GithubOutputEmitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputEmitter for GithubOutputEmitter {
    fn emit(&mut self, outputs: &Outputs) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        for (name, paths) in outputs.iter() {
            let value = paths.join("\n");
            file.write_all(format_output_entry(name, &value).as_bytes())?;
            print_group(name, &value);
        }
        file.flush()?;
        debug!(path = ?self.path, count = outputs.len(), "wrote outputs");
        Ok(())
    }
}

/// Prints outputs to stdout when there is no output file.
#[derive(Debug, Clone, Default)]
pub struct StdoutEmitter;

impl OutputEmitter for StdoutEmitter {
    fn emit(&mut self, outputs: &Outputs) -> Result<()> {
        for (name, paths) in outputs.iter() {
            let value = paths.join("\n");
            print_group(name, &value);
        }
        Ok(())
    }
}

fn print_group(name: &str, value: &str) {
    info!(output = name, "set output");
    println!("::group::Set output {name}");
    println!("{value}");
    println!("::endgroup::");
}

/// Pick a heredoc delimiter that does not occur as a line of `value`.
fn delimiter_for(value: &str) -> String {
    let mut delimiter = String::from("ghadelimiter");
    let mut n = 0u32;
    while value.lines().any(|l| l == delimiter) {
        n += 1;
        delimiter = format!("ghadelimiter_{n}");
    }
    delimiter
}

/// Format a single `GITHUB_OUTPUT` entry in multi-line form.
pub fn format_output_entry(name: &str, value: &str) -> String {
    let delimiter = delimiter_for(value);
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}
