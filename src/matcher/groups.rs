// src/matcher/groups.rs

//! Capture groups and their extraction from changed paths.

use std::collections::{BTreeMap, HashSet};

use blake3::Hasher;
use tracing::{debug, trace};

use crate::matcher::pattern::PatternSet;

/// Variable bindings produced by one path matching one pattern.
///
/// Keys are kept sorted, so two groups compare equal exactly when they hold
/// the same key/value pairs. A group never changes after it is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CaptureGroup {
    values: BTreeMap<String, String>,
}

impl CaptureGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical content digest of this group.
    ///
    /// Pairs are fed in key order with NUL terminators, so different key
    /// sets never collide on concatenation.
    pub fn digest(&self) -> String {
        let mut hasher = Hasher::new();
        for (k, v) in self.values.iter() {
            hasher.update(k.as_bytes());
            hasher.update(b"\0");
            hasher.update(v.as_bytes());
            hasher.update(b"\0");
        }
        hasher.finalize().to_hex().to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CaptureGroup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// True iff at least one path matches at least one pattern.
pub fn match_any<S: AsRef<str>>(patterns: &PatternSet, paths: &[S]) -> bool {
    paths
        .iter()
        .any(|path| patterns.is_match(path.as_ref()))
}

/// Collect the distinct capture groups produced by `patterns` over `paths`.
///
/// Every (path, pattern) match contributes its own group, so groups from
/// different patterns may carry different key sets. Patterns without
/// variables never contribute. Order is first-seen.
pub fn match_groups<S: AsRef<str>>(patterns: &PatternSet, paths: &[S]) -> Vec<CaptureGroup> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut groups = Vec::new();

    for path in paths {
        let path = path.as_ref();
        for pattern in patterns.iter().filter(|p| p.has_variables()) {
            let Some(group) = pattern.captures(path) else {
                continue;
            };
            let key = group.digest();
            if seen.insert(key) {
                trace!(path, pattern = pattern.as_str(), ?group, "new capture group");
                groups.push(group);
            }
        }
    }

    debug!(
        paths = paths.len(),
        patterns = patterns.len(),
        groups = groups.len(),
        "extracted capture groups"
    );
    groups
}
