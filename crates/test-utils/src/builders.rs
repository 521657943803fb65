#![allow(dead_code)]

use changed_paths::config::{Config, RawConfig};
use changed_paths::github::{EventContext, PullRequestInfo};

/// Builder for `Config` to simplify test setup.
pub struct ConfigBuilder {
    config: RawConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfig::default(),
        }
    }

    pub fn with_path(mut self, pattern: &str) -> Self {
        self.config.paths.push(pattern.to_string());
        self
    }

    pub fn with_fallback(mut self, pattern: &str) -> Self {
        self.config.paths_fallback.push(pattern.to_string());
        self
    }

    pub fn with_output(mut self, name: &str, template: &str) -> Self {
        self.config.outputs.push(format!("{name}={template}"));
        self
    }

    pub fn raw(self) -> RawConfig {
        self.config
    }

    pub fn build(self) -> Config {
        Config::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A `pull_request` event for `acme/infra#1` with the given file count.
pub fn pull_request_event(changed_files: u64) -> EventContext {
    EventContext::pull_request(
        "pull_request",
        PullRequestInfo {
            number: 1,
            changed_files,
            owner: "acme".to_string(),
            repo: "infra".to_string(),
        },
    )
}
