// src/github/mod.rs

//! Collaborators that talk to GitHub.
//!
//! - `event.rs` reads the triggering event and its pull request payload.
//! - `client.rs` lists the files changed by a pull request over the REST API.
//!
//! The engine only sees the [`ChangedFileLister`] trait, so tests can swap in
//! a fake that never touches the network.

pub mod client;
pub mod event;

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

pub use client::{GithubClient, DEFAULT_API_URL, PER_PAGE};
pub use event::{EventContext, PullRequestInfo, PULL_REQUEST_EVENTS};

/// Trait abstracting how the changed files of a pull request are listed.
pub trait ChangedFileLister: Send + Sync {
    /// Return every changed file path of `pr`, across all pages.
    fn list_changed_files<'a>(
        &'a self,
        pr: &'a PullRequestInfo,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>>;
}
