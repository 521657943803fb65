// src/engine/policy.rs

//! Pure selection policy.
//!
//! Nothing here performs IO. The async shell (`engine::runtime`) calls
//! [`pre_fetch_gate`], lists files only if told to, then calls
//! [`post_fetch_gate`] and [`resolve_outputs`].

use crate::config::Config;
use crate::engine::{Decision, FallbackReason, Outputs};
use crate::errors::{ChangedPathsError, Result};
use crate::github::{EventContext, PullRequestInfo};
use crate::matcher::{match_any, match_groups, transform, transform_to_wildcard};

/// Pull requests changing more files than this are never listed.
pub const MAX_CHANGED_FILES: u64 = 1000;

/// Result of the checks that run before any file is listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreFetch<'a> {
    /// List the files of this pull request, then call [`post_fetch_gate`].
    Fetch(&'a PullRequestInfo),
    Fallback(FallbackReason),
}

/// Event-type and volume gates.
///
/// A pull request event without pull request details is an upstream error,
/// not a fallback.
pub fn pre_fetch_gate(event: &EventContext) -> Result<PreFetch<'_>> {
    if !EventContext::is_pull_request_event(&event.event_name) {
        return Ok(PreFetch::Fallback(FallbackReason::NotPullRequest(
            event.event_name.clone(),
        )));
    }

    let pr = event.pull_request.as_ref().ok_or_else(|| {
        ChangedPathsError::Upstream(format!(
            "event {} carries no pull request details",
            event.event_name
        ))
    })?;

    if pr.changed_files > MAX_CHANGED_FILES {
        return Ok(PreFetch::Fallback(FallbackReason::TooManyChangedFiles(
            pr.changed_files,
        )));
    }
    Ok(PreFetch::Fetch(pr))
}

/// Fallback-pattern and empty-match gates over the listed files.
pub fn post_fetch_gate<S: AsRef<str>>(cfg: &Config, files: &[S]) -> Decision {
    if match_any(cfg.paths_fallback(), files) {
        return Decision::Fallback(FallbackReason::FallbackPathMatched);
    }

    let groups = match_groups(cfg.paths(), files);
    if groups.is_empty() {
        return Decision::Fallback(FallbackReason::NoMatch);
    }
    Decision::Match(groups)
}

/// Render every output template according to `decision`.
pub fn resolve_outputs(cfg: &Config, decision: &Decision) -> Outputs {
    let mut outputs = Outputs::new();
    for spec in cfg.outputs() {
        let paths = match decision {
            Decision::Match(groups) => transform(&spec.template, groups),
            Decision::Fallback(_) => transform_to_wildcard(&spec.template),
        };
        outputs.push(spec.name.clone(), paths);
    }
    outputs
}
