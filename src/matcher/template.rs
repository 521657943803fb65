// src/matcher/template.rs

//! Rendering output templates from capture groups.

use std::collections::HashSet;

use crate::matcher::groups::CaptureGroup;
use crate::matcher::pattern::{tokenize, Token};

/// Placeholder for a variable the group does not bind.
pub const WILDCARD: &str = "*";

fn render(template: &[Token<'_>], group: &CaptureGroup) -> String {
    let mut out = String::new();
    for token in template {
        match token {
            Token::Literal(s) => out.push_str(s),
            Token::Separator => out.push('/'),
            Token::Star => out.push('*'),
            Token::DoubleStar => out.push_str("**"),
            Token::Variable(name) => out.push_str(group.get(name).unwrap_or(WILDCARD)),
        }
    }
    out
}

/// Render `template` once per group, dropping repeated results.
///
/// Output order follows the first group that produced each path. No groups
/// means no paths.
pub fn transform(template: &str, groups: &[CaptureGroup]) -> Vec<String> {
    let tokens = tokenize(template);
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for group in groups {
        let path = render(&tokens, group);
        if seen.insert(path.clone()) {
            paths.push(path);
        }
    }
    paths
}

/// Render `template` with every variable replaced by `*`.
pub fn transform_to_wildcard(template: &str) -> Vec<String> {
    transform(template, &[CaptureGroup::new()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(pairs: &[(&str, &str)]) -> CaptureGroup {
        pairs.iter().copied().collect()
    }

    #[test]
    fn substitutes_each_group_in_order() {
        let paths = transform(
            "clusters/:cluster/:component/kustomization.yaml",
            &[
                group(&[("cluster", "staging"), ("component", "app")]),
                group(&[("cluster", "production"), ("component", "coredns")]),
            ],
        );
        assert_eq!(
            paths,
            vec![
                "clusters/staging/app/kustomization.yaml",
                "clusters/production/coredns/kustomization.yaml",
            ]
        );
    }

    #[test]
    fn missing_variable_becomes_wildcard() {
        let paths = transform("clusters/:cluster/:component", &[group(&[("cluster", "dev")])]);
        assert_eq!(paths, vec!["clusters/dev/*"]);
    }

    #[test]
    fn identical_renderings_are_collapsed() {
        let paths = transform(
            "clusters/:cluster/kustomization.yaml",
            &[
                group(&[("cluster", "staging"), ("component", "a")]),
                group(&[("cluster", "staging"), ("component", "b")]),
                group(&[("cluster", "prod"), ("component", "a")]),
            ],
        );
        assert_eq!(
            paths,
            vec![
                "clusters/staging/kustomization.yaml",
                "clusters/prod/kustomization.yaml",
            ]
        );
    }

    #[test]
    fn no_groups_no_paths() {
        assert!(transform("a/:b", &[]).is_empty());
    }

    #[test]
    fn wildcard_fallback_yields_one_path() {
        assert_eq!(
            transform_to_wildcard("clusters/:cluster/:component/kustomization.yaml"),
            vec!["clusters/*/*/kustomization.yaml"]
        );
        assert_eq!(transform_to_wildcard("static/path"), vec!["static/path"]);
    }

    #[test]
    fn partial_segment_variable_keeps_literal_suffix() {
        let paths = transform(
            "workflows/:workflow.yaml",
            &[group(&[("workflow", "ci")])],
        );
        assert_eq!(paths, vec!["workflows/ci.yaml"]);
        assert_eq!(
            transform_to_wildcard("workflows/:workflow.yaml"),
            vec!["workflows/*.yaml"]
        );
    }
}
