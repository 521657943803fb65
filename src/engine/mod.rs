// src/engine/mod.rs

//! Selection policy for changed-paths.
//!
//! Decides, per run, whether outputs are rendered from real capture groups or
//! from their wildcard form:
//! - the event is not a pull request → fallback
//! - the pull request changes too many files → fallback, nothing is listed
//! - a changed file matches `paths-fallback` → fallback
//! - no capture group was produced → fallback
//! - otherwise → match
//!
//! The pure decision functions live in [`policy`]; the async shell that
//! awaits the file listing is in [`runtime`].

use std::fmt;

use crate::matcher::CaptureGroup;

pub mod policy;
pub mod runtime;

pub use policy::{
    post_fetch_gate, pre_fetch_gate, resolve_outputs, PreFetch, MAX_CHANGED_FILES,
};
pub use runtime::{detect_changes, Detection};

/// Why outputs were rendered as wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    NotPullRequest(String),
    TooManyChangedFiles(u64),
    FallbackPathMatched,
    NoMatch,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NotPullRequest(event) => write!(f, "event is {event}"),
            FallbackReason::TooManyChangedFiles(n) => write!(
                f,
                "pull request has {n} changed files (more than {MAX_CHANGED_FILES})"
            ),
            FallbackReason::FallbackPathMatched => write!(f, "paths-fallback were matched"),
            FallbackReason::NoMatch => write!(f, "no changed file matched paths"),
        }
    }
}

/// Outcome of the selection policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Match(Vec<CaptureGroup>),
    Fallback(FallbackReason),
}

impl Decision {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Decision::Fallback(_))
    }
}

/// Resolved path lists, one per output variable, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    entries: Vec<(String, Vec<String>)>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, paths: Vec<String>) {
        self.entries.push((name.into(), paths));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, paths)| paths.as_slice())
    }

    /// The output as a single string: paths joined by newlines.
    pub fn value(&self, name: &str) -> Option<String> {
        self.get(name).map(|paths| paths.join("\n"))
    }
}
