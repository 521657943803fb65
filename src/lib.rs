// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod github;
pub mod logging;
pub mod matcher;
pub mod output;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, Config};
use crate::engine::{detect_changes, resolve_outputs, Decision, FallbackReason};
use crate::errors::Result;
use crate::github::{EventContext, GithubClient};
use crate::output::{GithubOutputEmitter, OutputEmitter, StdoutEmitter};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI/env inputs)
/// - event context
/// - GitHub client (only used for pull request events)
/// - selection policy
/// - output emission
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(args.config.as_deref(), args.raw_config())?;
    log_config(&cfg);

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let event = EventContext::load(&args.event_name, args.event_path.as_deref())?;
    let client = GithubClient::new(&args.api_url, args.token.clone())?;

    let detection = detect_changes(&cfg, &event, &client).await?;

    let mut emitter: Box<dyn OutputEmitter> = match &args.github_output {
        Some(path) => Box::new(GithubOutputEmitter::new(path)),
        None => Box::new(StdoutEmitter),
    };
    emitter.emit(&detection.outputs)?;

    debug!(decision = ?detection.decision, "run complete");
    Ok(())
}

fn log_config(cfg: &Config) {
    let outputs: Vec<String> = cfg
        .outputs()
        .iter()
        .map(|o| format!("{} => {}", o.name, o.template))
        .collect();
    info!(
        paths = cfg.paths().len(),
        paths_fallback = cfg.paths_fallback().len(),
        "parsed outputs as\n{}",
        outputs.join("\n")
    );
}

/// Simple dry-run output: print patterns, outputs and their wildcard form.
fn print_dry_run(cfg: &Config) {
    println!("changed-paths dry-run");
    println!();

    println!("paths ({}):", cfg.paths().len());
    for p in cfg.paths().iter() {
        if p.has_variables() {
            println!("  - {}  (variables: {})", p.as_str(), p.variables().join(", "));
        } else {
            println!("  - {}", p.as_str());
        }
    }

    if !cfg.paths_fallback().is_empty() {
        println!("paths-fallback ({}):", cfg.paths_fallback().len());
        for p in cfg.paths_fallback().iter() {
            println!("  - {}", p.as_str());
        }
    }

    let fallback = Decision::Fallback(FallbackReason::NotPullRequest("dry-run".into()));
    let outputs = resolve_outputs(cfg, &fallback);
    println!("outputs ({}):", outputs.len());
    for spec in cfg.outputs() {
        println!("  - {}", spec.name);
        println!("      template: {}", spec.template);
        if let Some(value) = outputs.value(&spec.name) {
            println!("      wildcard: {value}");
        }
    }

    debug!("dry-run complete (no API calls)");
}
