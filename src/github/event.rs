// src/github/event.rs

//! Triggering event context.
//!
//! GitHub Actions exposes the event kind in `GITHUB_EVENT_NAME` and the full
//! webhook payload as a JSON file at `GITHUB_EVENT_PATH`. Only the handful of
//! pull request fields the selection policy needs are deserialized.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{ChangedPathsError, Result};

/// Event names treated as pull request events.
pub const PULL_REQUEST_EVENTS: &[&str] = &["pull_request", "pull_request_target"];

/// Pull request facts taken from the event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    pub number: u64,
    pub changed_files: u64,
    /// Owner of the base repository.
    pub owner: String,
    /// Name of the base repository.
    pub repo: String,
}

/// The event that triggered this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub event_name: String,
    /// Present iff `event_name` is a pull request event.
    pub pull_request: Option<PullRequestInfo>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    changed_files: u64,
    base: BasePayload,
}

#[derive(Debug, Deserialize)]
struct BasePayload {
    repo: RepoPayload,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

impl EventContext {
    /// Context for a non pull request event.
    pub fn other(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            pull_request: None,
        }
    }

    pub fn pull_request(event_name: impl Into<String>, info: PullRequestInfo) -> Self {
        Self {
            event_name: event_name.into(),
            pull_request: Some(info),
        }
    }

    pub fn is_pull_request_event(event_name: &str) -> bool {
        PULL_REQUEST_EVENTS.iter().any(|e| *e == event_name)
    }

    /// Build the context from an event name and the JSON payload text.
    ///
    /// A pull request event whose payload lacks the pull request fields is an
    /// upstream error; other events ignore the payload entirely.
    pub fn from_payload(event_name: &str, payload: Option<&str>) -> Result<Self> {
        if !Self::is_pull_request_event(event_name) {
            return Ok(Self::other(event_name));
        }

        let payload = payload.ok_or_else(|| {
            ChangedPathsError::Upstream(format!(
                "event {event_name} requires an event payload but none was provided"
            ))
        })?;
        let parsed: Payload = serde_json::from_str(payload)?;
        let pr = parsed.pull_request.ok_or_else(|| {
            ChangedPathsError::Upstream(format!(
                "event {event_name} payload has no pull_request object"
            ))
        })?;

        let info = PullRequestInfo {
            number: pr.number,
            changed_files: pr.changed_files,
            owner: pr.base.repo.owner.login,
            repo: pr.base.repo.name,
        };
        debug!(?info, "parsed pull request payload");
        Ok(Self::pull_request(event_name, info))
    }

    /// Read the context from an event name and an optional payload file.
    pub fn load(event_name: &str, payload_path: Option<&Path>) -> Result<Self> {
        if !Self::is_pull_request_event(event_name) {
            return Ok(Self::other(event_name));
        }
        let payload = match payload_path {
            Some(path) => Some(fs::read_to_string(path)?),
            None => None,
        };
        Self::from_payload(event_name, payload.as_deref())
    }
}
