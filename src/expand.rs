//! Recursive placeholder expansion.
//!
//! A placeholder is the shortest `$key$` token whose key contains no
//! whitespace. Expansion scans text left to right, splices resolved values
//! in with the surrounding indentation preserved, and leaves unknown keys
//! untouched. Resolution of a key may itself require expanding that key's
//! raw text, so each top-level call runs inside a session that caches
//! finished keys and tracks the in-progress chain for cycle detection.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{CycleChain, CycleError};
use crate::replacements::{Replacement, ReplacementMap};

/// `$key$` with a non-whitespace key, shortest match.
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$(\S+?)\$").expect("placeholder pattern is valid"))
}

/// Expand every placeholder in `text` through `resolve`.
///
/// `resolve` returns the replacement for a key, `None` for unknown keys
/// (which pass through verbatim), or a cycle error. `origin` labels the text
/// being expanded in trace output. If nothing was replaced the original text
/// is returned unchanged.
pub fn expand_with<R>(text: &str, origin: &str, mut resolve: R) -> Result<String, CycleError>
where
    R: FnMut(&str) -> Result<Option<String>, CycleError>,
{
    let mut buffer = String::new();
    let mut start = 0;
    let mut replaced = false;
    for capture in placeholder_pattern().captures_iter(text) {
        let token = capture.get(0).expect("match always has a full group");
        let key = &capture[1];
        let Some(value) = resolve(key)? else {
            println!("can not expand meta-value '{key}' encountered in {origin}");
            continue;
        };

        buffer.push_str(&text[start..token.start()]);
        let indent = column_of(text, token.start());
        buffer.push_str(&indent_text(&value, indent));
        start = token.end();
        println!("applied replacement '{key}' to {origin}");
        replaced = true;
    }

    if !replaced {
        return Ok(text.to_string());
    }
    buffer.push_str(&text[start..]);
    Ok(buffer)
}

/// Column of `offset` within its line: characters since the preceding
/// newline, or since the start of text if there is none.
fn column_of(text: &str, offset: usize) -> usize {
    let line_start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    text[line_start..offset].chars().count()
}

/// Re-indent a replacement for splicing at the given column.
///
/// The first line is inserted as-is; every following non-blank line is
/// prefixed with the column's worth of spaces so multi-line values keep the
/// visual structure of the insertion point.
fn indent_text(text: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut result = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
            if !line.trim().is_empty() {
                result.push_str(&pad);
            }
        }
        result.push_str(line);
    }
    result
}

/// One top-level expansion call against a replacement set.
///
/// Holds the cache of fully resolved keys and the stack of keys currently
/// being resolved. Sessions are cheap; create one per body of text and
/// discard it afterwards. State is never shared between sessions.
pub struct ExpansionSession<'a> {
    replacements: &'a ReplacementMap,
    resolved: HashMap<String, String>,
    in_progress: Vec<(String, Replacement)>,
}

impl<'a> ExpansionSession<'a> {
    pub fn new(replacements: &'a ReplacementMap) -> Self {
        Self {
            replacements,
            resolved: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    /// Expand a body of text, resolving keys from the replacement set.
    pub fn expand(&mut self, text: &str, origin: &str) -> Result<String, CycleError> {
        expand_with(text, origin, |key| self.resolve_key(key))
    }

    /// Resolve one key to its fully expanded value.
    ///
    /// Returns the cached value when the key was already resolved in this
    /// session, `None` when the set does not know the key at all, and a
    /// cycle error when the key is already being resolved further down the
    /// chain.
    pub fn resolve_key(&mut self, key: &str) -> Result<Option<String>, CycleError> {
        if let Some(done) = self.resolved.get(key) {
            return Ok(Some(done.clone()));
        }
        let Some(value) = self.replacements.get(key).cloned() else {
            return Ok(None);
        };
        if self.in_progress.iter().any(|(k, _)| k == key) {
            return Err(self.cycle_error(key, &value));
        }

        self.in_progress.push((key.to_string(), value.clone()));
        let result = expand_with(&value.text, &value.origin, |nested| self.resolve_key(nested));
        self.in_progress.pop();

        let expanded = result?;
        self.resolved.insert(key.to_string(), expanded.clone());
        Ok(Some(expanded))
    }

    /// Render the in-progress chain, oldest first, terminated by the key
    /// that closed the cycle.
    fn cycle_error(&self, key: &str, value: &Replacement) -> CycleError {
        let mut links: Vec<(String, String)> = self
            .in_progress
            .iter()
            .map(|(k, v)| (k.clone(), v.origin.clone()))
            .collect();
        links.push((key.to_string(), value.origin.clone()));
        CycleError {
            chain: CycleChain::Replacements(links),
        }
    }
}

/// Expand a body of text against a replacement set.
///
/// Convenience wrapper creating a fresh session for one call.
pub fn expand(text: &str, replacements: &ReplacementMap, origin: &str) -> Result<String, CycleError> {
    ExpansionSession::new(replacements).expand(text, origin)
}
