//! Legacy include-file expansion.
//!
//! The older resolution scheme keeps no consolidated replacement set:
//! while a target file is being expanded, each `$key$` is looked up as a
//! file named `<key>.<ext>` in the include directory and that file's content
//! is expanded recursively with the same lookup. Cycle detection runs per
//! target file and diagnoses chains by the files containing each occurrence
//! rather than by value origins.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CycleChain, CycleError};
use crate::expand::expand_with;
use crate::replacements::{include_key, REPLACEMENTS_FILE_NAME};

/// Expand one target file against the include directory.
///
/// Returns the file content unchanged when there is no include directory.
pub fn expand_file(target: &Path, include_dir: &Path) -> Result<String> {
    let text = fs::read_to_string(target)
        .with_context(|| format!("failed to read {}", target.display()))?;

    if !include_dir.is_dir() {
        println!(
            "skipped includes replacement - no include directory is found at {}",
            include_dir.display()
        );
        return Ok(text);
    }

    let mut resolver = IncludeResolver {
        include_dir,
        target,
        in_progress: Vec::new(),
    };
    let origin = format!("file {}", file_name(target));
    let expanded = expand_with(&text, &origin, |key| resolver.resolve(key))?;
    Ok(expanded)
}

struct IncludeResolver<'a> {
    include_dir: &'a Path,
    target: &'a Path,
    /// Keys currently being expanded, each with the include file it named.
    in_progress: Vec<(String, PathBuf)>,
}

impl IncludeResolver<'_> {
    fn resolve(&mut self, key: &str) -> Result<Option<String>, CycleError> {
        if self.in_progress.iter().any(|(k, _)| k == key) {
            return Err(self.cycle_error(key));
        }
        let Some(include) = find_include_file(self.include_dir, key) else {
            return Ok(None);
        };

        // An include file that can't be read is treated as unknown.
        let Ok(text) = fs::read_to_string(&include) else {
            println!("can not read include file {}", include.display());
            return Ok(None);
        };

        let origin = format!("include file {}", file_name(&include));
        self.in_progress.push((key.to_string(), include));
        let result = expand_with(&text, &origin, |nested| self.resolve(nested));
        self.in_progress.pop();
        result.map(Some)
    }

    /// Chain links are labelled with the file containing each occurrence:
    /// the first key was seen in the target file, every later key in the
    /// include file of the key before it.
    fn cycle_error(&self, key: &str) -> CycleError {
        let mut links = Vec::new();
        let mut location = self.target.to_path_buf();
        for (k, include) in &self.in_progress {
            links.push((k.clone(), location));
            location = include.clone();
        }
        links.push((key.to_string(), location));
        CycleError {
            chain: CycleChain::Includes(links),
        }
    }
}

/// Find the include file for a key: the first regular file (byte-wise name
/// order) whose extension-stripped name equals the key. The reserved
/// replacements file never matches.
fn find_include_file(include_dir: &Path, key: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(include_dir).ok()?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
        .into_iter()
        .find(|name| name != REPLACEMENTS_FILE_NAME && include_key(name) == key)
        .map(|name| include_dir.join(name))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
