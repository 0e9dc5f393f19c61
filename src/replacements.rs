//! Replacement values and the sources that contribute them.
//!
//! Two kinds of sources feed the replacement set: a flat properties file
//! (`key=value` lines) and an include directory where every file becomes one
//! value keyed by its extension-stripped name. Sources are merged with eager
//! conflict detection - a key claimed by two sources fails the run before
//! any expansion starts, so merge order never changes the result.

use anyhow::{bail, Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::ConflictError;

/// File name reserved for the properties source inside the include directory.
pub const REPLACEMENTS_FILE_NAME: &str = "replacements.properties";

/// A raw, unexpanded replacement value.
///
/// `text` may itself contain `$key$` placeholders. `origin` is a display
/// label identifying where the value came from; it is used only in
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    pub origin: String,
}

impl Replacement {
    pub fn new(text: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: origin.into(),
        }
    }
}

/// The merged, conflict-checked mapping of all known keys for one run.
pub type ReplacementMap = BTreeMap<String, Replacement>;

/// One source's contribution to the replacement set.
#[derive(Debug, Clone)]
pub struct Contribution {
    /// Description of the source, e.g. `replacements file <path>`.
    pub source: String,
    pub values: ReplacementMap,
}

/// Load replacements from a flat properties file.
///
/// Lines are `key=value`; blank lines and `#`/`!` comments are skipped, key
/// and value are trimmed. A missing file is an empty contribution, not an
/// error.
pub fn from_properties_file(path: &Path) -> Result<Contribution> {
    let source = format!("replacements file {}", path.display());
    if !path.is_file() {
        println!("no replacements file is found in {}", path.display());
        return Ok(Contribution {
            source,
            values: ReplacementMap::new(),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read replacements file {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mut values = ReplacementMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(
                key.trim().to_string(),
                Replacement::new(
                    value.trim().to_string(),
                    format!("property from file {file_name}"),
                ),
            );
        }
    }
    Ok(Contribution { source, values })
}

/// Load replacements from the files of an include directory.
///
/// Every regular file except the reserved properties file contributes its
/// full content under its extension-stripped name. A missing directory is an
/// empty contribution.
pub fn from_include_dir(dir: &Path) -> Result<Contribution> {
    let source = format!("include directory {}", dir.display());
    if !dir.is_dir() {
        println!("no include directory is found at {}", dir.display());
        return Ok(Contribution {
            source,
            values: ReplacementMap::new(),
        });
    }

    let mut values = ReplacementMap::new();
    let mut key_files: HashMap<String, String> = HashMap::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to list include directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name == REPLACEMENTS_FILE_NAME {
            continue;
        }

        let key = include_key(&name);
        if let Some(previous) = key_files.get(key) {
            bail!(
                "both '{previous}' and '{name}' in {} define replacement '{key}'",
                dir.display()
            );
        }
        key_files.insert(key.to_string(), name.clone());

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read include file {}", path.display()))?;
        values.insert(
            key.to_string(),
            Replacement::new(text, format!("include file {name}")),
        );
    }
    Ok(Contribution { source, values })
}

/// The replacement key an include file name maps to: the name up to its
/// first `.`, or the whole name for dotfiles.
pub fn include_key(name: &str) -> &str {
    match name.find('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

/// Build the conflict-checked replacement set from both standard sources.
pub fn load_all(replacements_file: &Path, include_dir: &Path) -> Result<ReplacementMap> {
    let properties = from_properties_file(replacements_file)?;
    let includes = from_include_dir(include_dir)?;
    let merged = merge(vec![properties, includes])?;
    Ok(merged)
}

/// Merge contributions into one replacement set.
///
/// Any key claimed by more than one contribution fails the merge outright;
/// because duplicates are rejected, the resulting set does not depend on
/// contribution order.
pub fn merge(contributions: Vec<Contribution>) -> Result<ReplacementMap, ConflictError> {
    let mut merged = ReplacementMap::new();
    let mut owners: HashMap<String, String> = HashMap::new();
    for contribution in contributions {
        for (key, value) in contribution.values {
            if let Some(first_source) = owners.get(&key) {
                return Err(ConflictError {
                    key,
                    first_source: first_source.clone(),
                    second_origin: value.origin,
                });
            }
            owners.insert(key.clone(), contribution.source.clone());
            merged.insert(key, value);
        }
    }
    Ok(merged)
}
