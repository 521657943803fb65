use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use changed_paths::errors::{ChangedPathsError, Result};
use changed_paths::github::{ChangedFileLister, PullRequestInfo};

/// A fake lister that:
/// - records every pull request it was asked about
/// - returns a fixed file list, or a fixed upstream error.
#[derive(Debug, Clone)]
pub struct FakeLister {
    files: std::result::Result<Vec<String>, String>,
    calls: Arc<Mutex<Vec<u64>>>,
}

impl FakeLister {
    pub fn with_files(files: &[&str]) -> Self {
        Self {
            files: Ok(files.iter().map(|f| f.to_string()).collect()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            files: Err(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pull request numbers passed to `list_changed_files`, in call order.
    pub fn calls(&self) -> Vec<u64> {
        self.calls.lock().unwrap().clone()
    }
}

impl ChangedFileLister for FakeLister {
    fn list_changed_files<'a>(
        &'a self,
        pr: &'a PullRequestInfo,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(pr.number);
            self.files
                .clone()
                .map_err(ChangedPathsError::Upstream)
        })
    }
}
