// src/github/client.rs

//! REST client for listing the files changed by a pull request.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::errors::{ChangedPathsError, Result};
use crate::github::event::PullRequestInfo;
use crate::github::ChangedFileLister;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the pull request files endpoint accepts.
pub const PER_PAGE: usize = 100;

const USER_AGENT: &str = concat!("changed-paths/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct FileEntry {
    filename: String,
}

/// Outcome of a single page request that did not succeed.
enum Attempt {
    Retry(String),
    Fail(ChangedPathsError),
}

/// GitHub API client.
///
/// Retries rate-limit and server errors with exponential backoff; any other
/// failure is returned immediately.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: String,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl GithubClient {
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            max_retries: 3,
            retry_delay_ms: 1000,
        })
    }

    pub fn with_retry(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn files_url(&self, pr: &PullRequestInfo) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.api_url, pr.owner, pr.repo, pr.number
        )
    }

    /// Fetch every page of changed files, in API order.
    pub async fn list_files(&self, pr: &PullRequestInfo) -> Result<Vec<String>> {
        if self.token.is_empty() {
            return Err(ChangedPathsError::ConfigError(
                "a token is required to list pull request files".to_string(),
            ));
        }
        info!(owner = %pr.owner, repo = %pr.repo, number = pr.number, "listing files in pull request");

        let mut files = Vec::new();
        let mut page = 1u32;
        loop {
            let entries = self.fetch_page(pr, page).await?;
            let count = entries.len();
            files.extend(entries.into_iter().map(|e| e.filename));
            debug!(page, count, total = files.len(), "received files page");
            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        info!(count = files.len(), "listed changed files");
        Ok(files)
    }

    async fn fetch_page(&self, pr: &PullRequestInfo, page: u32) -> Result<Vec<FileEntry>> {
        let mut retry_count = 0;
        loop {
            match self.request_page(pr, page).await {
                Ok(entries) => return Ok(entries),
                Err(Attempt::Fail(e)) => return Err(e),
                Err(Attempt::Retry(msg)) => {
                    if retry_count >= self.max_retries {
                        return Err(ChangedPathsError::Upstream(format!(
                            "{msg} (gave up after {retry_count} retries)"
                        )));
                    }
                    retry_count += 1;
                    let delay = backoff_ms(self.retry_delay_ms, retry_count);
                    warn!(page, retry_count, delay_ms = delay, error = %msg, "retrying files request");
                    sleep(Duration::from_millis(delay)).await;
                }
            }
        }
    }

    async fn request_page(
        &self,
        pr: &PullRequestInfo,
        page: u32,
    ) -> std::result::Result<Vec<FileEntry>, Attempt> {
        let per_page = PER_PAGE.to_string();
        let page_str = page.to_string();
        let response = self
            .client
            .get(self.files_url(pr))
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .header("x-github-api-version", "2022-11-28")
            .query(&[("per_page", per_page.as_str()), ("page", page_str.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    Attempt::Retry(format!("request failed: {e}"))
                } else {
                    Attempt::Fail(e.into())
                }
            })?;

        match response.status() {
            StatusCode::OK => response
                .json::<Vec<FileEntry>>()
                .await
                .map_err(|e| Attempt::Fail(e.into())),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() => {
                Err(Attempt::Retry(format!("files request returned {status}")))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(Attempt::Fail(ChangedPathsError::Upstream(format!(
                    "files request returned {status}: {body}"
                ))))
            }
        }
    }
}

fn backoff_ms(base_ms: u64, retry_count: u32) -> u64 {
    base_ms.saturating_mul(2u64.saturating_pow(retry_count.saturating_sub(1)))
}

impl ChangedFileLister for GithubClient {
    fn list_changed_files<'a>(
        &'a self,
        pr: &'a PullRequestInfo,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        Box::pin(self.list_files(pr))
    }
}
