// src/matcher/pattern.rs

//! Path pattern tokenizer and compiler.
//!
//! A pattern is a `/`-separated path where:
//! - `:name` binds one or more non-`/` characters to `name`
//! - `*` matches one or more non-`/` characters
//! - `**` matches one or more characters, including `/`
//! - everything else is matched literally
//!
//! The same tokenizer drives output templates (see [`super::template`]), so
//! both sides agree on what a variable token is.

use std::fmt;

use regex::Regex;

use crate::errors::{ChangedPathsError, Result};
use crate::matcher::groups::CaptureGroup;

/// A lexical element of a pattern or template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    Variable(&'a str),
    Star,
    DoubleStar,
    Separator,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn flush<'a>(tokens: &mut Vec<Token<'a>>, literal: &'a str) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
}

/// Split a pattern into tokens.
///
/// A `:` not followed by at least one name character is a literal colon.
pub fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = pattern.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' => {
                flush(&mut tokens, &pattern[literal_start..i]);
                tokens.push(Token::Separator);
                i += 1;
                literal_start = i;
            }
            b'*' => {
                flush(&mut tokens, &pattern[literal_start..i]);
                if bytes.get(i + 1) == Some(&b'*') {
                    tokens.push(Token::DoubleStar);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
                literal_start = i;
            }
            b':' => {
                let name_len = pattern[i + 1..]
                    .chars()
                    .take_while(|c| is_name_char(*c))
                    .count();
                if name_len == 0 {
                    i += 1;
                    continue;
                }
                flush(&mut tokens, &pattern[literal_start..i]);
                // Name characters are ASCII, so char count == byte count.
                tokens.push(Token::Variable(&pattern[i + 1..i + 1 + name_len]));
                i += 1 + name_len;
                literal_start = i;
            }
            _ => i += 1,
        }
    }
    flush(&mut tokens, &pattern[literal_start..]);
    tokens
}

/// A pattern compiled into an anchored regular expression.
///
/// Captures are positional; `variables[i]` names capture group `i + 1`.
#[derive(Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    variables: Vec<String>,
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.source)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

impl CompiledPattern {
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut expr = String::with_capacity(pattern.len() * 2 + 2);
        let mut variables: Vec<String> = Vec::new();

        expr.push('^');
        for token in tokenize(pattern) {
            match token {
                Token::Literal(s) => expr.push_str(&regex::escape(s)),
                Token::Separator => expr.push('/'),
                Token::Star => expr.push_str("[^/]+?"),
                Token::DoubleStar => expr.push_str(".+?"),
                Token::Variable(name) => {
                    if variables.iter().any(|v| v == name) {
                        return Err(ChangedPathsError::InvalidPattern {
                            pattern: pattern.to_string(),
                            reason: format!("variable `:{name}` appears more than once"),
                        });
                    }
                    variables.push(name.to_string());
                    expr.push_str("([^/]+?)");
                }
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| ChangedPathsError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            variables,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Variable names in the order they appear in the pattern.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and bind every variable of this pattern.
    ///
    /// Returns `None` when the path does not match. A matching pattern
    /// without variables yields an empty group.
    pub fn captures(&self, path: &str) -> Option<CaptureGroup> {
        let caps = self.regex.captures(path)?;
        let pairs = self.variables.iter().enumerate().filter_map(|(i, name)| {
            caps.get(i + 1)
                .map(|m| (name.clone(), m.as_str().to_string()))
        });
        Some(CaptureGroup::from_pairs(pairs))
    }
}

/// An ordered list of compiled patterns, matched with OR semantics.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| CompiledPattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    /// True if any pattern in the set matches `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(p: &str) -> CompiledPattern {
        CompiledPattern::compile(p).unwrap()
    }

    #[test]
    fn tokenize_mixes_literals_and_variables() {
        assert_eq!(
            tokenize(".github/workflows/:workflow.yaml"),
            vec![
                Token::Literal(".github"),
                Token::Separator,
                Token::Literal("workflows"),
                Token::Separator,
                Token::Variable("workflow"),
                Token::Literal(".yaml"),
            ]
        );
    }

    #[test]
    fn tokenize_keeps_bare_colon_literal() {
        assert_eq!(tokenize("a:/b"), vec![
            Token::Literal("a:"),
            Token::Separator,
            Token::Literal("b"),
        ]);
    }

    #[test]
    fn tokenize_wildcards() {
        assert_eq!(
            tokenize("src/**/*.rs"),
            vec![
                Token::Literal("src"),
                Token::Separator,
                Token::DoubleStar,
                Token::Separator,
                Token::Star,
                Token::Literal(".rs"),
            ]
        );
    }

    #[test]
    fn literal_dot_is_not_a_wildcard() {
        let p = compile("a.yaml");
        assert!(p.is_match("a.yaml"));
        assert!(!p.is_match("axyaml"));
    }

    #[test]
    fn single_star_stays_in_one_segment() {
        let p = compile("clusters/*/app.yaml");
        assert!(p.is_match("clusters/staging/app.yaml"));
        assert!(!p.is_match("clusters/a/b/app.yaml"));
        assert!(!p.is_match("clusters//app.yaml"));
    }

    #[test]
    fn double_star_crosses_segments() {
        let p = compile("clusters/**");
        assert!(p.is_match("clusters/a/b/c.yaml"));
        assert!(!p.is_match("clusters/"));
        assert!(!p.is_match("clusters"));
    }

    #[test]
    fn matching_is_anchored_and_case_sensitive() {
        let p = compile("src/:name");
        assert!(!p.is_match("x/src/main.rs"));
        assert!(!p.is_match("src/main.rs/"));
        assert!(!p.is_match("SRC/main.rs"));
    }

    #[test]
    fn empty_pattern_matches_only_empty_path() {
        let p = compile("");
        assert!(p.is_match(""));
        assert!(!p.is_match("a"));
    }

    #[test]
    fn partial_segment_variable_excludes_suffix() {
        let p = compile(".github/workflows/:workflow.yaml");
        let group = p.captures(".github/workflows/ci.yaml").unwrap();
        assert_eq!(group.get("workflow"), Some("ci"));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let p = compile("docs/(draft)+/:page");
        assert!(p.is_match("docs/(draft)+/intro"));
        assert!(!p.is_match("docs/draftdraft/intro"));
    }

    #[test]
    fn duplicate_variable_is_rejected() {
        let err = CompiledPattern::compile(":a/:a").unwrap_err();
        assert!(matches!(err, ChangedPathsError::InvalidPattern { .. }));
    }

    #[test]
    fn pattern_set_is_logical_or() {
        let set = PatternSet::compile(&["a/**", "b/*"]).unwrap();
        assert!(set.is_match("a/x/y"));
        assert!(set.is_match("b/x"));
        assert!(!set.is_match("c/x"));
    }
}
