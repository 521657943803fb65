// src/matcher/mod.rs

//! Path matching, variable capture and template substitution.
//!
//! This module is pure: no IO, no async. It turns:
//! - pattern strings into compiled matchers (`pattern.rs`)
//! - changed paths into deduplicated capture groups (`groups.rs`)
//! - output templates plus capture groups into concrete paths (`template.rs`)

pub mod groups;
pub mod pattern;
pub mod template;

pub use groups::{match_any, match_groups, CaptureGroup};
pub use pattern::{tokenize, CompiledPattern, PatternSet, Token};
pub use template::{transform, transform_to_wildcard, WILDCARD};
