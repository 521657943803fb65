// src/engine/runtime.rs

use tracing::info;

use crate::config::Config;
use crate::errors::Result;
use crate::github::{ChangedFileLister, EventContext};

use super::policy::{post_fetch_gate, pre_fetch_gate, resolve_outputs, PreFetch};
use super::{Decision, Outputs};

/// Result of one change-detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub decision: Decision,
    pub outputs: Outputs,
}

/// Run the selection policy for one event.
///
/// The lister is awaited at most once, and only when the event and volume
/// gates allow it. Listing errors are returned as-is; they never turn into a
/// fallback.
pub async fn detect_changes<L>(cfg: &Config, event: &EventContext, lister: &L) -> Result<Detection>
where
    L: ChangedFileLister + ?Sized,
{
    let decision = match pre_fetch_gate(event)? {
        PreFetch::Fallback(reason) => Decision::Fallback(reason),
        PreFetch::Fetch(pr) => {
            let files = lister.list_changed_files(pr).await?;
            info!(count = files.len(), number = pr.number, "fetched changed files");
            post_fetch_gate(cfg, &files)
        }
    };

    match &decision {
        Decision::Fallback(reason) => {
            info!(%reason, "transform paths to wildcards");
        }
        Decision::Match(groups) => {
            info!(groups = groups.len(), "transform paths");
        }
    }

    let outputs = resolve_outputs(cfg, &decision);
    Ok(Detection { decision, outputs })
}
